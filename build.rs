fn main() {
    println!("cargo:rerun-if-changed=migrations");

    git_revision::set();
}

mod git_revision {
    use std::env;
    use std::process::Command;

    const GIT_REVISION: &str = "GIT_REVISION";

    pub fn set() {
        if env::var(GIT_REVISION).is_ok() {
            println!("Environment variable {GIT_REVISION} is set. Not setting.");
            return;
        }

        let revision = match Command::new("git").args(["status", "--porcelain"]).output() {
            Ok(status) if !status.status.success() => "unknown".to_string(),
            Ok(status) if !status.stdout.is_empty() => "dirty".to_string(),
            Ok(_) => Command::new("git")
                .args(["rev-parse", "HEAD"])
                .output()
                .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
                .unwrap_or_else(|_| "unknown".to_string()),
            Err(_) => "unknown".to_string(),
        };

        println!("cargo:rustc-env={GIT_REVISION}={revision}");
    }
}
