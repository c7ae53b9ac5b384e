use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, FnArg, GenericArgument, ItemFn, LitStr, Pat, PathArguments, ReturnType,
    Signature, Type,
};

/// Exports a function under an unmangled symbol and records its C prototype.
///
/// `#[c_export]` keeps the Rust name as the symbol; `#[c_export(name = "fooBar")]` exports it as
/// `fooBar`. Alongside the function a `<NAME>_C_DECL: &str` constant is emitted holding the C
/// declaration, so the header can be assembled from the Rust signatures.
#[proc_macro_attribute]
pub fn c_export(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut export_name: Option<LitStr> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            export_name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported c_export property"))
        }
    });
    parse_macro_input!(attr with parser);
    let item = parse_macro_input!(item as ItemFn);

    expand(export_name, item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(export_name: Option<LitStr>, item: ItemFn) -> syn::Result<TokenStream2> {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = item;

    check_abi(&sig)?;

    let symbol = export_name
        .as_ref()
        .map(LitStr::value)
        .unwrap_or_else(|| sig.ident.to_string());
    let prototype = c_prototype(&sig, &symbol)?;
    let decl_ident = format_ident!("{}_C_DECL", sig.ident.to_string().to_uppercase());
    let decl_doc = format!("C declaration of `{symbol}`.");

    let linkage = match export_name {
        Some(name) => quote! { #[export_name = #name] },
        None => quote! { #[no_mangle] },
    };

    Ok(quote! {
        #[doc = #decl_doc]
        #vis const #decl_ident: &str = #prototype;

        #(#attrs)*
        #linkage
        #vis #sig #block
    })
}

fn check_abi(sig: &Signature) -> syn::Result<()> {
    let name = sig.abi.as_ref().and_then(|abi| abi.name.as_ref());
    match name.map(LitStr::value).as_deref() {
        Some("C") | Some("C-unwind") => Ok(()),
        _ => Err(syn::Error::new_spanned(
            &sig.ident,
            "c_export requires an `extern \"C\"` or `extern \"C-unwind\"` function",
        )),
    }
}

fn c_prototype(sig: &Signature, symbol: &str) -> syn::Result<String> {
    let ret = match &sig.output {
        ReturnType::Default => "void".to_string(),
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Never(_) => "void".to_string(),
            ty => c_type(ty, None)?,
        },
    };

    let mut params = Vec::new();
    for input in &sig.inputs {
        let FnArg::Typed(arg) = input else {
            return Err(syn::Error::new_spanned(input, "methods cannot be exported"));
        };
        let Pat::Ident(pat) = arg.pat.as_ref() else {
            return Err(syn::Error::new_spanned(
                &arg.pat,
                "exported parameters must be plain identifiers",
            ));
        };
        params.push(c_type(&arg.ty, Some(&pat.ident.to_string()))?);
    }
    let params = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };

    Ok(format!("{ret} {symbol}({params});"))
}

/// Renders `ty` as C, optionally as a declarator named `name`.
fn c_type(ty: &Type, name: Option<&str>) -> syn::Result<String> {
    let unsupported = || syn::Error::new_spanned(ty, "type has no C equivalent in c_export");

    let Type::Path(path) = ty else {
        return Err(unsupported());
    };
    let segment = path.path.segments.last().ok_or_else(unsupported)?;

    let scalar = match segment.ident.to_string().as_str() {
        "c_int" | "i32" => "int",
        "bool" => "bool",
        "Option" => {
            // Option<extern fn()> is the nullable C function pointer.
            let PathArguments::AngleBracketed(args) = &segment.arguments else {
                return Err(unsupported());
            };
            let Some(GenericArgument::Type(Type::BareFn(func))) = args.args.first() else {
                return Err(unsupported());
            };
            if func.abi.is_none()
                || !func.inputs.is_empty()
                || !matches!(func.output, ReturnType::Default)
            {
                return Err(unsupported());
            }
            return Ok(format!("void (*{})(void)", name.unwrap_or("")));
        }
        _ => return Err(unsupported()),
    };

    Ok(match name {
        Some(name) => format!("{scalar} {name}"),
        None => scalar.to_string(),
    })
}
