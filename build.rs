//! Stamps the `pup --version` string with when and from what it was built.
//!
//! - `PUP_BUILD_TIMESTAMP`: UTC build time, `%Y-%m-%dT%H:%M:%SZ`
//! - `PUP_GIT_COMMIT`: abbreviated HEAD commit, or "unknown" outside a checkout

use std::process::Command;

fn main() {
    for path in [".git/HEAD", ".git/index", "data/breweries.json"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=PUP_BUILD_TIMESTAMP={built_at}");
    println!(
        "cargo:rustc-env=PUP_GIT_COMMIT={}",
        head_commit().as_deref().unwrap_or("unknown")
    );
}

fn head_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let commit = String::from_utf8(output.stdout).ok()?;
    Some(commit.trim().to_string()).filter(|c| !c.is_empty())
}
