//! `bp new <name>`: scaffold a library from the embedded template

use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;
use crate::error::{BuildError, BuildResult};

/// Token replaced with the library name in every template file
pub const LIBRARY_TOKEN: &str = "{{LIBRARY}}";

/// Template files as `(relative path, contents)`
const TEMPLATE: &[(&str, &str)] = &[
    (".gitignore", include_str!("../../templates/library/gitignore")),
    ("README.md", include_str!("../../templates/library/README.md")),
    (
        "blueprint.config.toml",
        include_str!("../../templates/library/blueprint.config.toml"),
    ),
    ("package.json", include_str!("../../templates/library/package.json")),
    (
        "tsconfig.lib.json",
        include_str!("../../templates/library/tsconfig.lib.json"),
    ),
    (
        "src/alert/element.css",
        include_str!("../../templates/library/src/alert/element.css"),
    ),
    (
        "src/alert/element.ts",
        include_str!("../../templates/library/src/alert/element.ts"),
    ),
    (
        "src/alert/index.ts",
        include_str!("../../templates/library/src/alert/index.ts"),
    ),
    (
        "src/include/alert.ts",
        include_str!("../../templates/library/src/include/alert.ts"),
    ),
];

/// Files written by a scaffold run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldResult {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

pub struct ScaffoldUseCase<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> ScaffoldUseCase<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    /// Create `<parent>/<name>` from the template.
    ///
    /// Never writes into an existing path.
    pub fn execute(&self, parent: &Path, name: &str) -> BuildResult<ScaffoldResult> {
        validate_name(name)?;
        let root = parent.join(name);
        if self.fs.exists(&root) {
            return Err(BuildError::Scaffold {
                name: name.to_string(),
                reason: format!("{} already exists", root.display()),
            });
        }

        let mut files = Vec::with_capacity(TEMPLATE.len());
        for (relative, contents) in TEMPLATE {
            let path = root.join(relative);
            self.fs.write(&path, &contents.replace(LIBRARY_TOKEN, name))?;
            files.push(path);
        }
        log::info!("scaffolded {} files into {}", files.len(), root.display());
        Ok(ScaffoldResult { root, files })
    }
}

fn validate_name(name: &str) -> BuildResult<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name must not contain path separators")
    } else if name == "." || name == ".." {
        Some("name must be a directory name")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(BuildError::Scaffold {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
