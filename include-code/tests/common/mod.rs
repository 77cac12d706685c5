//! Shared fixtures: a throwaway repository checkout with annotated source files.

use include_code::{Resolver, ResolverOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const COUNTER_RS: &str = r#"pub struct Counter {
    value: u64,
}

impl Counter {
    // docs:start:increment
    pub fn increment(&mut self) {
        // highlight-next-line:increment
        self.value += 1;
        // docs:start:overflow
        assert!(self.value > 0); // this-will-error:overflow
        // docs:end:overflow
    }
    // docs:end:increment
}
"#;

pub const DEPLOY_PY: &str = r#"# docs:start:deploy:deploy-full
client = connect()
# docs:end:deploy
client.deploy()
# docs:end:deploy-full
"#;

/// A temporary source tree with a couple of annotated files.
pub struct Repo {
    pub dir: TempDir,
}

impl Repo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let repo = Repo { dir };
        repo.write("src/counter.rs", COUNTER_RS);
        repo.write("scripts/deploy.py", DEPLOY_PY);
        repo
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dirs");
        }
        fs::write(path, content).expect("write fixture");
    }

    pub fn resolver(&self) -> Resolver {
        self.resolver_with_tag(None)
    }

    pub fn resolver_with_tag(&self, tag: Option<&str>) -> Resolver {
        Resolver::new(ResolverOptions {
            root_dir: self.root().to_path_buf(),
            commit_tag: tag.map(str::to_string),
            ..ResolverOptions::default()
        })
    }
}
