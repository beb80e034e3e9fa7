use std::collections::BTreeSet;

/// Folder used for assemblies when a package declares none.
pub const DEFAULT_ASSEMBLY_FOLDER: &str = "lib";

/// A file placed into a published package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAssembly {
    pub file_name: String,
    pub sub_folder: String,
}

impl PublishedAssembly {
    /// Sub-folder separators are normalized to `/` (`lib\net40` becomes `lib/net40`).
    pub fn new(file_name: impl Into<String>, sub_folder: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            sub_folder: sub_folder.into().replace('\\', "/"),
        }
    }

    /// File name without its `.dll`/`.exe` extension.
    pub fn name(&self) -> &str {
        self.file_name
            .strip_suffix(".dll")
            .or_else(|| self.file_name.strip_suffix(".exe"))
            .unwrap_or(&self.file_name)
    }
}

/// A package published by a solution (a nuspec in NuGet terms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPackage {
    pub name: String,
    pub version: String,
    pub assemblies: Vec<PublishedAssembly>,
    /// Install-time package dependencies. These never create build-order edges.
    pub depends_on: BTreeSet<String>,
}

impl PublishedPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            assemblies: Vec::new(),
            depends_on: BTreeSet::new(),
        }
    }

    pub fn assembly(mut self, file_name: &str, sub_folder: &str) -> Self {
        self.assemblies
            .push(PublishedAssembly::new(file_name, sub_folder));
        self
    }

    pub fn depends_on(mut self, package: impl Into<String>) -> Self {
        self.depends_on.insert(package.into());
        self
    }

    /// Fill in `{name}.dll` under `lib` when no assembly was declared.
    pub fn with_default_assembly(mut self) -> Self {
        if self.assemblies.is_empty() {
            let file_name = format!("{}.dll", self.name);
            self.assemblies
                .push(PublishedAssembly::new(file_name, DEFAULT_ASSEMBLY_FOLDER));
        }
        self
    }
}
