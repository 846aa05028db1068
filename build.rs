use std::process::Command;

const HASH_ENV: &str = "BOOKSHELF_GIT_HASH";

/// `abc1234` or `abc1234-dirty`, from `git describe`
fn describe_head() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=7", "--exclude=*"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    // Container builds have no .git; they pass the hash in instead
    let hash = std::env::var(HASH_ENV)
        .ok()
        .filter(|h| !h.is_empty())
        .or_else(describe_head)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={}={}", HASH_ENV, hash);
    println!("cargo:rerun-if-env-changed={}", HASH_ENV);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}
