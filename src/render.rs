//! Starlark rendering of a [`SourceManifest`].
//!
//! Output layout:
//!
//! ```text
//! # Auto-generated from aws-lc-sys cc_builder
//!
//! UNIVERSAL_SRCS = [
//!     "aws-lc/crypto/asn1/a_bitstr.c",
//! ]
//!
//! LINUX_X86_ASM = []
//! ```

use crate::manifest::{NamedList, SourceManifest};

/// Render the full generated file.
pub fn render_manifest(manifest: &SourceManifest) -> String {
    let mut out = String::new();

    out.push_str(&manifest.header);
    out.push_str("\n\n");

    render_list(&mut out, &manifest.universal);
    for platform in &manifest.platforms {
        render_list(&mut out, platform);
    }
    for name in &manifest.placeholders {
        out.push_str(&format!("{} = []\n\n", name));
    }

    out
}

/// Render one list declaration, one entry per line, followed by a blank line.
///
/// An extracted list with no entries still uses the multi-line form so it
/// stays distinguishable from a placeholder.
pub fn render_list(out: &mut String, list: &NamedList) {
    out.push_str(&format!("{} = [\n", list.name));
    for source in &list.sources {
        out.push_str(&format!("    \"{}\",\n", source));
    }
    out.push_str("]\n\n");
}
