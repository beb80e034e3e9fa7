/// A named package source configured on a solution.
///
/// Only the name is known here; callers resolve it to a feed client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feed {
    pub name: String,
}

impl Feed {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
