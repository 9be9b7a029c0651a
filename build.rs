use std::process::Command;

fn main() {
	// Embed git commit hash when building from a checkout; empty otherwise
	let git_hash = Command::new("git")
		.args(["rev-parse", "--short", "HEAD"])
		.output()
		.ok()
		.filter(|out| out.status.success())
		.map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
		.unwrap_or_default();
	println!("cargo:rustc-env=GIT_HASH={git_hash}");
}
