//! Page template embedded with rust-embed

use rust_embed::RustEmbed;

use crate::error::RenderError;

/// Embed the assets directory at compile time
#[derive(RustEmbed)]
#[folder = "assets"]
struct TemplateAssets;

/// Template the graph page is rendered from.
pub const GRAPH_TEMPLATE: &str = "graph.html";

/// Pinned vis-network release the page is written against.
pub const VIS_NETWORK_VERSION: &str = "9.1.9";

/// Standalone UMD bundle compiled into the binary, fetched into
/// `assets/vendor/` by `scripts/fetch-vis-network.sh`.
pub const VIS_NETWORK_BUNDLE: &str = "vendor/vis-network.min.js";

/// CDN copy of the same release, used with `--cdn` or when the bundle is absent.
pub const VIS_NETWORK_CDN: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// Load an embedded template as text.
pub fn template(name: &'static str) -> Result<String, RenderError> {
    TemplateAssets::get(name)
        .map(|file| String::from_utf8_lossy(&file.data).into_owned())
        .ok_or(RenderError::MissingTemplate(name))
}

/// The embedded vis-network bundle, if it was present at build time.
pub fn vis_bundle() -> Option<String> {
    TemplateAssets::get(VIS_NETWORK_BUNDLE)
        .map(|file| String::from_utf8_lossy(&file.data).into_owned())
}

/// Replace every `{{key}}` in one pass. Substituted text is never rescanned,
/// so a note title that happens to contain a placeholder stays literal.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let replaced = after.find("}}").and_then(|end| {
            let key = after[..end].trim();
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end))
        });

        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_exists() {
        let page = template(GRAPH_TEMPLATE).unwrap();
        assert!(page.contains("{{graph_json}}"));
        assert!(page.contains("{{options_json}}"));
        assert!(page.contains("{{vis_script}}"));
    }

    #[test]
    fn test_nonexistent_template() {
        assert!(matches!(
            template("nonexistent.html"),
            Err(RenderError::MissingTemplate("nonexistent.html"))
        ));
    }

    #[test]
    fn test_cdn_matches_pinned_version() {
        assert!(VIS_NETWORK_CDN.contains(&format!("vis-network@{VIS_NETWORK_VERSION}/")));
    }

    #[test]
    fn test_bundle_is_standalone_script() {
        if let Some(js) = vis_bundle() {
            assert!(!js.is_empty());
            assert!(!js.contains("<script"));
        }
    }

    #[test]
    fn test_fill_is_single_pass() {
        let out = fill("<{{a}}|{{b}}>", &[("a", "{{b}}"), ("b", "B")]);
        assert_eq!(out, "<{{b}}|B>");
    }

    #[test]
    fn test_fill_leaves_unknown_keys() {
        let out = fill("{{ known }} {{unknown}} {{", &[("known", "yes")]);
        assert_eq!(out, "yes {{unknown}} {{");
    }
}
