//! Loader snippet template.
//!
//! The external packager embeds one snippet per object directory in the
//! mod's entry file. The snippet lists the directory and loads its files
//! in the order the encoded index gives.

use rustc_hash::FxHashMap;

use super::encoder::LoadOrderIndex;

const DIRECTORY_LOADER: &str = r#"local {{directory}}_files = NFS.getDirectoryItems(SMODS.current_mod.path .. "{{directory}}")
local {{directory}}_order = {{load_order}}
for _, index in ipairs({{directory}}_order) do
    local file_name = {{directory}}_files[index]
    if file_name then
        assert(SMODS.load_file("{{directory}}/" .. file_name))()
    end
end"#;

/// Text template with `{{name}}` placeholders.
#[derive(Clone, Debug)]
pub struct LoaderTemplate {
    template: &'static str,
    variables: FxHashMap<&'static str, String>,
}

impl LoaderTemplate {
    /// Wrap a template text.
    #[must_use]
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            variables: FxHashMap::default(),
        }
    }

    /// Template that loads one object directory in encoded order.
    #[must_use]
    pub fn directory_loader() -> Self {
        Self::new(DIRECTORY_LOADER)
    }

    /// Set a placeholder value.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key, value.into());
        self
    }

    /// Substitute every placeholder that has a value.
    #[must_use]
    pub fn render(&self) -> String {
        let mut result = self.template.to_string();
        for (key, value) in &self.variables {
            result = result.replace(&format!("{{{{{key}}}}}"), value);
        }
        result
    }
}

/// Render the loader of one directory.
#[must_use]
pub fn loader_snippet(directory: &str, index: &LoadOrderIndex) -> String {
    let mut template = LoaderTemplate::directory_loader();
    template
        .set("directory", directory)
        .set("load_order", index.to_lua());
    template.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_rendering() {
        let mut template = LoaderTemplate::new("x = {{a}} + {{a}} + {{b}}");
        template.set("a", "1");
        assert_eq!(template.render(), "x = 1 + 1 + {{b}}");
    }

    #[test]
    fn test_loader_snippet() {
        let index = LoadOrderIndex::new(vec![2, 1], None).unwrap();
        let snippet = loader_snippet("jokers", &index);
        assert!(snippet.starts_with(
            "local jokers_files = NFS.getDirectoryItems(SMODS.current_mod.path .. \"jokers\")"
        ));
        assert!(snippet.contains("local jokers_order = { 2, 1 }"));
        assert!(snippet.contains("SMODS.load_file(\"jokers/\" .. file_name)"));
        assert!(!snippet.contains("{{"));
    }
}
