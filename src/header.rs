use crate::{
    exports::{THROW_FUNC_C_DECL, TRY_FUNC_C_DECL},
    INITIALIZE_C_DECL,
};

/// Every exported prototype, in header order.
pub const C_DECLS: &[&str] = &[INITIALIZE_C_DECL, THROW_FUNC_C_DECL, TRY_FUNC_C_DECL];

/// Renders the C header declaring the exported symbols.
pub fn c_header() -> String {
    let mut header = String::from(
        "#ifndef CROSSTHROW_H\n\
         #define CROSSTHROW_H\n\
         \n\
         #include <stdbool.h>\n\
         \n\
         #ifdef __cplusplus\n\
         extern \"C\" {\n\
         #endif\n\
         \n",
    );
    for decl in C_DECLS {
        header.push_str(decl);
        header.push('\n');
    }
    header.push_str(
        "\n\
         #ifdef __cplusplus\n\
         }\n\
         #endif\n\
         \n\
         #endif\n",
    );
    header
}
