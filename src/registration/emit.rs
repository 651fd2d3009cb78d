//! Rendering of the generated registration unit
//!
//! The layout is fixed:
//!
//! ```c
//! /* WARNING: Autogenerated file - see registrar! */
//!
//! #include "comac-boilerplate-private.h"
//!
//! void _register_builtin (void);
//! void _register_pdf (void);
//!
//! void
//! _comac_boilerplate_register_all (void)
//! {
//!     _register_builtin ();
//!     _register_pdf ();
//! }
//! ```
//!
//! Nothing time- or host-dependent is written, so equal inputs render to
//! equal bytes.

use crate::config::MarkerProfile;
use crate::registration::types::RegistrationTable;

const INDENT: &str = "    ";

/// Renders the generated source for `table`
pub fn render(profile: &MarkerProfile, table: &RegistrationTable) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "/* WARNING: Autogenerated file - see {}! */\n\n",
        profile.tool_name
    ));
    out.push_str(&format!("#include \"{}\"\n\n", profile.private_header));

    for registration in table {
        out.push_str(&format!(
            "void {} (void);\n",
            profile.symbol_for(&registration.name)
        ));
    }
    out.push('\n');

    out.push_str(&format!("void\n{} (void)\n{{\n", profile.aggregate_function));
    for registration in table {
        out.push_str(&format!(
            "{}{} ();\n",
            INDENT,
            profile.symbol_for(&registration.name)
        ));
    }
    out.push_str("}\n");

    out
}
