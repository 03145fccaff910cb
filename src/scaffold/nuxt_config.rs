//! `nuxt.config.ts` editing.
//!
//! The file is parsed with tree-sitter's TypeScript grammar. Edits locate the
//! object handed to `defineNuxtConfig(...)` (or exported directly), then splice
//! the source by node byte ranges, so formatting and comments elsewhere in the
//! file survive untouched.

use anyhow::{bail, Context, Result};
use std::fs;
use std::ops::Range;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree, TreeCursor};

const DEFINE_CONFIG: &str = "defineNuxtConfig";

/// Parse `source`, rejecting anything tree-sitter had to recover from.
fn syntax_tree(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .context("Failed to set TypeScript language for tree-sitter")?;

    let tree = parser
        .parse(source, None)
        .context("Failed to parse TypeScript")?;
    if tree.root_node().has_error() {
        bail!("Syntax error in config file");
    }
    Ok(tree)
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Contents of a quoted string literal.
fn string_value(node: Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let raw = text(node, source);
    if raw.len() < 2 {
        return None;
    }
    raw.get(1..raw.len() - 1).map(str::to_string)
}

/// Collect every node of `kind` below the cursor, in source order.
fn collect<'t>(cursor: &mut TreeCursor<'t>, kind: &str, found: &mut Vec<Node<'t>>) {
    let node = cursor.node();
    if node.kind() == kind {
        found.push(node);
    }

    if cursor.goto_first_child() {
        loop {
            collect(cursor, kind, found);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn descendants<'t>(tree: &'t Tree, kind: &str) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    collect(&mut tree.walk(), kind, &mut found);
    found
}

/// The config object: the argument of the `defineNuxtConfig(...)` call, or a
/// plain `export default { ... }`.
fn config_object<'t>(tree: &'t Tree, source: &str) -> Result<Node<'t>> {
    let called = descendants(tree, "call_expression").into_iter().find(|call| {
        call.child_by_field_name("function")
            .is_some_and(|f| text(f, source) == DEFINE_CONFIG)
    });

    if let Some(call) = called {
        let argument = call
            .child_by_field_name("arguments")
            .and_then(first_named);
        return match argument {
            Some(object) if object.kind() == "object" => Ok(object),
            _ => bail!("{DEFINE_CONFIG} is not given an object literal"),
        };
    }

    descendants(tree, "export_statement")
        .into_iter()
        .filter_map(|export| export.child_by_field_name("value"))
        .find(|value| value.kind() == "object")
        .with_context(|| format!("No {DEFINE_CONFIG}({{...}}) or default-exported object"))
}

/// First named child that is not a comment.
fn first_named(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

/// One property of an object or one element of an array.
struct Entry<'t> {
    node: Node<'t>,
    /// Byte offset of the `,` following the entry, if any
    comma: Option<usize>,
    /// Property key, or the module name for array elements
    key: Option<String>,
}

impl Entry<'_> {
    fn start(&self) -> usize {
        self.node.start_byte()
    }

    fn end(&self) -> usize {
        self.comma.map_or(self.node.end_byte(), |c| c + 1)
    }
}

fn entry_key(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "pair" => {
            let key = node.child_by_field_name("key")?;
            string_value(key, source).or_else(|| Some(text(key, source).to_string()))
        }
        "shorthand_property_identifier" => Some(text(node, source).to_string()),
        // `['module-name', { options }]`
        "array" => first_named(node).and_then(|first| string_value(first, source)),
        _ => string_value(node, source),
    }
}

/// Properties of an object node, or elements of an array node.
fn entries<'t>(container: Node<'t>, source: &str) -> Vec<Entry<'t>> {
    let mut cursor = container.walk();
    let children: Vec<Node<'t>> = container
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();

    children
        .into_iter()
        .map(|node| Entry {
            node,
            comma: node
                .next_sibling()
                .filter(|next| next.kind() == ",")
                .map(|comma| comma.start_byte()),
            key: entry_key(node, source),
        })
        .collect()
}

fn property<'t>(object: Node<'t>, source: &str, key: &str) -> Option<Node<'t>> {
    entries(object, source)
        .into_iter()
        .find(|entry| entry.node.kind() == "pair" && entry.key.as_deref() == Some(key))
        .map(|entry| entry.node)
}

fn line_start(source: &str, at: usize) -> usize {
    source[..at].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line containing `at`.
fn indent_at(source: &str, at: usize) -> &str {
    let line = &source[line_start(source, at)..at];
    let width = line.len() - line.trim_start_matches(&[' ', '\t'][..]).len();
    &line[..width]
}

/// Byte range to delete so `entries[index]` disappears cleanly: its whole
/// line(s) when it stands alone, otherwise the entry plus one separator.
fn removal_span(source: &str, entries: &[Entry], index: usize) -> Range<usize> {
    let entry = &entries[index];
    let start = entry.start();
    let end = entry.end();
    let line_start = line_start(source, start);
    let rest = &source[end..];
    let after = end + (rest.len() - rest.trim_start_matches(&[' ', '\t'][..]).len());

    let alone_on_line = source[line_start..start].trim().is_empty()
        && (after == source.len() || source.as_bytes()[after] == b'\n');

    if alone_on_line {
        return line_start..(after + 1).min(source.len());
    }
    if entry.comma.is_some() {
        return start..after;
    }
    // last inline element: take the comma in front of it
    match index.checked_sub(1).and_then(|p| entries[p].comma) {
        Some(prev_comma) => prev_comma..entry.node.end_byte(),
        None => start..entry.node.end_byte(),
    }
}

/// Quote character the file already uses, `'` when it has no strings.
fn quote(tree: &Tree, source: &str) -> char {
    descendants(tree, "string")
        .first()
        .and_then(|s| text(*s, source).chars().next())
        .unwrap_or('\'')
}

fn is_alias_prefix(c: char) -> bool {
    matches!(c, '~' | '@' | '.' | '/')
}

/// Parsed handle on a `nuxt.config.ts` source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuxtConfig {
    source: String,
}

impl NuxtConfig {
    /// Accepts only syntactically valid text whose config object can be located.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let tree = syntax_tree(&source)?;
        config_object(&tree, &source)?;
        Ok(Self { source })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.source)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of registered modules, in order. Unnamed (inline) modules are skipped.
    pub fn modules(&self) -> Vec<String> {
        let Ok(tree) = syntax_tree(&self.source) else {
            return Vec::new();
        };
        let Ok(object) = config_object(&tree, &self.source) else {
            return Vec::new();
        };
        property(object, &self.source, "modules")
            .and_then(|pair| pair.child_by_field_name("value"))
            .filter(|value| value.kind() == "array")
            .map(|array| {
                entries(array, &self.source)
                    .into_iter()
                    .filter_map(|e| e.key)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules().iter().any(|m| m == name)
    }

    /// Unregister `name` from `modules`. Returns whether it was present.
    pub fn remove_module(&mut self, name: &str) -> Result<bool> {
        let tree = syntax_tree(&self.source)?;
        let object = config_object(&tree, &self.source)?;
        let Some(pair) = property(object, &self.source, "modules") else {
            return Ok(false);
        };
        let Some(array) = pair
            .child_by_field_name("value")
            .filter(|value| value.kind() == "array")
        else {
            bail!("`modules` is not an array literal");
        };

        let elements = entries(array, &self.source);
        let Some(target) = elements.iter().position(|e| e.key.as_deref() == Some(name)) else {
            return Ok(false);
        };

        let span = removal_span(&self.source, &elements, target);
        self.source.replace_range(span, "");
        Ok(true)
    }

    /// Drop a whole top-level property. Returns whether it was present.
    pub fn remove_property(&mut self, key: &str) -> Result<bool> {
        let tree = syntax_tree(&self.source)?;
        let object = config_object(&tree, &self.source)?;
        let properties = entries(object, &self.source);
        let Some(index) = properties
            .iter()
            .position(|p| p.node.kind() == "pair" && p.key.as_deref() == Some(key))
        else {
            return Ok(false);
        };

        let span = removal_span(&self.source, &properties, index);
        self.source.replace_range(span, "");
        Ok(true)
    }

    /// Whether any string literal points at `path` (with any alias prefix).
    pub fn references(&self, path: &str) -> bool {
        let path = path.trim_start_matches(is_alias_prefix);
        let Ok(tree) = syntax_tree(&self.source) else {
            return false;
        };
        descendants(&tree, "string")
            .into_iter()
            .filter_map(|s| string_value(s, &self.source))
            .any(|value| value.trim_start_matches(is_alias_prefix) == path)
    }

    /// Include the stylesheet at `alias` globally unless it already is.
    ///
    /// Appends to an existing `css` array; otherwise adds a `css` line right
    /// after the config object opens. Returns whether the text changed.
    pub fn inject_stylesheet(&mut self, alias: &str) -> Result<bool> {
        if self.references(alias) {
            return Ok(false);
        }

        let tree = syntax_tree(&self.source)?;
        let object = config_object(&tree, &self.source)?;
        let q = quote(&tree, &self.source);
        let literal = format!("{q}{alias}{q}");

        let (at, insert) = match property(object, &self.source, "css") {
            Some(pair) => {
                let Some(array) = pair
                    .child_by_field_name("value")
                    .filter(|value| value.kind() == "array")
                else {
                    bail!("`css` is not an array literal");
                };
                let elements = entries(array, &self.source);
                match elements.last() {
                    None => (array.start_byte() + 1, literal),
                    Some(last) if text(array, &self.source).contains('\n') => {
                        let indent = indent_at(&self.source, last.start());
                        match last.comma {
                            Some(comma) => (comma + 1, format!("\n{indent}{literal},")),
                            None => (last.node.end_byte(), format!(",\n{indent}{literal}")),
                        }
                    }
                    Some(last) => (last.node.end_byte(), format!(", {literal}")),
                }
            }
            None => {
                let open = object.start_byte();
                let properties = entries(object, &self.source);
                let indent = properties
                    .first()
                    .filter(|p| line_start(&self.source, p.start()) > open)
                    .map(|p| indent_at(&self.source, p.start()))
                    .filter(|indent| !indent.is_empty())
                    .unwrap_or("  ");
                let mut line = format!("\n{indent}css: [{literal}],");
                if properties.is_empty() && !text(object, &self.source).contains('\n') {
                    line.push('\n');
                }
                (open + 1, line)
            }
        };

        self.source.insert_str(at, &insert);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VUETIFY_CONFIG: &str = r#"// https://nuxt.com/docs/api/configuration/nuxt-config
export default defineNuxtConfig({
  compatibilityDate: '2024-11-01',
  devtools: { enabled: true },
  modules: [
    '@nuxt/eslint',
    'vuetify-nuxt-module',
  ],
  vuetify: {
    moduleOptions: {
      /* module specific options */
    },
    vuetifyOptions: {
      /* vuetify options */
    },
  },
})
"#;

    #[test]
    fn test_modules_are_listed_in_order() -> Result<()> {
        let config = NuxtConfig::parse(VUETIFY_CONFIG)?;
        assert_eq!(config.modules(), vec!["@nuxt/eslint", "vuetify-nuxt-module"]);
        assert!(config.has_module("vuetify-nuxt-module"));
        Ok(())
    }

    #[test]
    fn test_remove_module_line() -> Result<()> {
        let mut config = NuxtConfig::parse(VUETIFY_CONFIG)?;
        assert!(config.remove_module("vuetify-nuxt-module")?);
        assert!(!config.remove_module("vuetify-nuxt-module")?);

        assert_eq!(config.modules(), vec!["@nuxt/eslint"]);
        assert!(config.source().contains("  modules: [\n    '@nuxt/eslint',\n  ],\n"));
        Ok(())
    }

    #[test]
    fn test_remove_tuple_module_and_options_block() -> Result<()> {
        let source = r#"export default defineNuxtConfig({
  modules: [
    ['vuetify-nuxt-module', {
      styles: 'sass',
    }],
    '@pinia/nuxt',
  ],
  vuetify: { vuetifyOptions: {} },
  ssr: true,
})
"#;
        let mut config = NuxtConfig::parse(source)?;
        assert!(config.remove_module("vuetify-nuxt-module")?);
        assert!(config.remove_property("vuetify")?);

        assert_eq!(
            config.source(),
            "export default defineNuxtConfig({\n  modules: [\n    '@pinia/nuxt',\n  ],\n  ssr: true,\n})\n"
        );
        Ok(())
    }

    #[test]
    fn test_remove_inline_modules() -> Result<()> {
        let mut config =
            NuxtConfig::parse("export default defineNuxtConfig({ modules: ['a', 'vuetify-nuxt-module'] })")?;
        config.remove_module("vuetify-nuxt-module")?;
        assert_eq!(config.source(), "export default defineNuxtConfig({ modules: ['a'] })");

        let mut config =
            NuxtConfig::parse("export default defineNuxtConfig({ modules: [\"vuetify-nuxt-module\", \"a\"] })")?;
        config.remove_module("vuetify-nuxt-module")?;
        assert_eq!(config.source(), "export default defineNuxtConfig({ modules: [\"a\"] })");
        Ok(())
    }

    #[test]
    fn test_strings_and_comments_do_not_confuse_parser() -> Result<()> {
        let source = r#"export default defineNuxtConfig({
  app: { head: { title: 'modules: [x, y]' } },
  // modules: ['commented-out'],
  modules: [
    /* keep */ 'vuetify-nuxt-module',
  ],
})
"#;
        let config = NuxtConfig::parse(source)?;
        assert_eq!(config.modules(), vec!["vuetify-nuxt-module"]);
        Ok(())
    }

    #[test]
    fn test_inject_stylesheet_after_opening() -> Result<()> {
        let mut config = NuxtConfig::parse(VUETIFY_CONFIG)?;
        assert!(config.inject_stylesheet("~/assets/css/main.css")?);
        assert!(config.source().contains(
            "export default defineNuxtConfig({\n  css: ['~/assets/css/main.css'],\n  compatibilityDate"
        ));

        let once = config.source().to_string();
        assert!(!config.inject_stylesheet("~/assets/css/main.css")?);
        assert_eq!(config.source(), once);
        Ok(())
    }

    #[test]
    fn test_inject_stylesheet_appends_to_existing_css() -> Result<()> {
        let mut config = NuxtConfig::parse(
            "export default defineNuxtConfig({\n  css: [\n    '~/assets/fonts.css',\n  ],\n})\n",
        )?;
        config.inject_stylesheet("~/assets/css/main.css")?;
        assert_eq!(
            config.source(),
            "export default defineNuxtConfig({\n  css: [\n    '~/assets/fonts.css',\n    '~/assets/css/main.css',\n  ],\n})\n"
        );

        let mut inline = NuxtConfig::parse("export default defineNuxtConfig({ css: [] })")?;
        inline.inject_stylesheet("~/assets/css/main.css")?;
        assert_eq!(
            inline.source(),
            "export default defineNuxtConfig({ css: ['~/assets/css/main.css'] })"
        );
        Ok(())
    }

    #[test]
    fn test_existing_reference_with_other_alias_counts() -> Result<()> {
        let mut config =
            NuxtConfig::parse("export default defineNuxtConfig({\n  css: ['@/assets/css/main.css'],\n})\n")?;
        assert!(config.references("assets/css/main.css"));
        assert!(!config.inject_stylesheet("~/assets/css/main.css")?);
        Ok(())
    }

    #[test]
    fn test_plain_default_export() -> Result<()> {
        let config = NuxtConfig::parse("export default {\n  modules: ['@nuxt/ui'],\n}\n")?;
        assert_eq!(config.modules(), vec!["@nuxt/ui"]);
        Ok(())
    }

    #[test]
    fn test_unparseable_config_is_rejected() {
        assert!(NuxtConfig::parse("module.exports = 42").is_err());
        assert!(NuxtConfig::parse("export default defineNuxtConfig({ modules: [").is_err());
    }

    #[test]
    fn test_imported_define_config_is_found() -> Result<()> {
        let source = "import { defineNuxtConfig } from 'nuxt/config'\n\nexport default defineNuxtConfig({ modules: ['@nuxt/eslint','vuetify-nuxt-module'] })\n";
        let mut config = NuxtConfig::parse(source)?;
        assert!(config.remove_module("vuetify-nuxt-module")?);
        assert_eq!(config.modules(), vec!["@nuxt/eslint"]);
        assert!(config.source().starts_with("import { defineNuxtConfig } from 'nuxt/config'\n"));
        Ok(())
    }

    #[test]
    fn test_unterminated_string_is_rejected() {
        let err = NuxtConfig::parse("export default defineNuxtConfig({ modules: ['a'] })\n'").unwrap_err();
        assert!(err.to_string().contains("Syntax error"));
    }
}
