//! Config derive implementation: FIELDS constants plus TOML template output.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Parsed field information.
struct FieldInfo {
    ident: syn::Ident,
    toml_name: String,
    doc: Option<String>,
    example: Option<String>,
    default_lit: Option<String>,
    skip: bool,
    is_option: bool,
    ty: Type,
}

impl FieldInfo {
    fn parse(field: &syn::Field) -> Option<Self> {
        let ident = field.ident.as_ref()?.clone();
        let attrs = &field.attrs;
        let toml_name = get_string_attr(attrs, "name").unwrap_or_else(|| ident.to_string());

        Some(Self {
            toml_name,
            doc: extract_doc_comment(attrs),
            example: get_string_attr(attrs, "example"),
            default_lit: get_string_attr(attrs, "default"),
            skip: has_flag(attrs, "skip"),
            is_option: type_to_string(&field.ty).starts_with("Option<"),
            ty: field.ty.clone(),
            ident,
        })
    }
}

/// Generate the Config implementation (FIELDS + template).
pub fn derive(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields_struct_name = syn::Ident::new(&format!("{name}Fields"), name.span());

    let section = get_string_attr(&input.attrs, "section")
        .unwrap_or_else(|| infer_section(&name.to_string()));
    let section_doc = extract_doc_comment(&input.attrs).unwrap_or_default();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return quote! { compile_error!("Config only works on structs with named fields"); };
            }
        },
        _ => return quote! { compile_error!("Config only works on structs"); },
    };

    let infos: Vec<FieldInfo> = fields.iter().filter_map(FieldInfo::parse).collect();
    let visible: Vec<&FieldInfo> = infos.iter().filter(|f| !f.skip).collect();

    let field_defs = visible.iter().map(|f| {
        let ident = &f.ident;
        quote! { pub #ident: crate::config::FieldPath, }
    });

    let field_inits = visible.iter().map(|f| {
        let ident = &f.ident;
        let path = join_path(&section, &f.toml_name);
        quote! { #ident: crate::config::FieldPath::new(#path), }
    });

    // `default` is only needed when some field renders its runtime default.
    let needs_default = visible
        .iter()
        .any(|f| !f.is_option && f.default_lit.is_none());
    let default_def = if needs_default {
        quote! { let default = Self::default(); }
    } else {
        quote! {}
    };

    let template_code: Vec<TokenStream> = visible.iter().map(|f| field_template(f)).collect();

    quote! {
        /// Generated field path accessors.
        pub struct #fields_struct_name {
            #(#field_defs)*
        }

        impl #name {
            /// Field paths for diagnostic messages.
            pub const FIELDS: #fields_struct_name = #fields_struct_name {
                #(#field_inits)*
            };

            /// Section name for TOML output.
            pub const TEMPLATE_SECTION: &'static str = #section;

            /// Section documentation.
            pub const TEMPLATE_DOC: &'static str = #section_doc;

            /// Generate the TOML template body for this section.
            pub fn template() -> String {
                #default_def
                let mut out = String::new();
                #(#template_code)*
                out
            }

            /// Generate the TOML template with comment header and `[section]` line.
            pub fn template_with_header() -> String {
                let mut out = String::new();
                for line in Self::TEMPLATE_DOC.lines() {
                    out.push_str("# ");
                    out.push_str(line.trim());
                    out.push('\n');
                }
                if !Self::TEMPLATE_SECTION.is_empty() {
                    out.push('[');
                    out.push_str(Self::TEMPLATE_SECTION);
                    out.push_str("]\n");
                }
                out.push_str(&Self::template());
                out
            }
        }
    }
}

/// Generate template code for a single field.
fn field_template(info: &FieldInfo) -> TokenStream {
    let doc_code = match &info.doc {
        Some(doc) => {
            let rendered: String = doc.lines().map(|l| format!("# {}\n", l.trim())).collect();
            quote! { out.push_str(#rendered); }
        }
        None => quote! {},
    };

    let toml_name = &info.toml_name;

    // Optional fields are commented out; `example` supplies a sample value.
    if info.is_option {
        let value = info
            .example
            .clone()
            .or_else(|| info.default_lit.clone())
            .unwrap_or_default();
        let line = format!("# {toml_name} = \"{value}\"\n");
        return quote! {
            #doc_code
            out.push_str(#line);
        };
    }

    // Explicit default literal, formatted for its type at macro time.
    if let Some(default_lit) = &info.default_lit {
        let rendered = format_default(default_lit, &type_to_string(&info.ty));
        let line = format!("{toml_name} = {rendered}\n");
        return quote! {
            #doc_code
            out.push_str(#line);
        };
    }

    // Runtime default via Default::default(), rendered as a TOML value.
    let ident = &info.ident;
    quote! {
        #doc_code
        out.push_str(#toml_name);
        out.push_str(" = ");
        out.push_str(
            &toml::Value::try_from(default.#ident.clone())
                .map(|v| v.to_string())
                .unwrap_or_default(),
        );
        out.push('\n');
    }
}

// ============================================================================
// attribute parsing
// ============================================================================

/// Get string value from `#[config(key = "value")]`.
fn get_string_attr(attrs: &[Attribute], key: &str) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut value = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let lit: syn::LitStr = meta.value()?.parse()?;
                value = Some(lit.value());
            } else if meta.input.peek(syn::Token![=]) {
                // Consume other key = value pairs so parsing can continue.
                let _ = meta.value();
                let _: Option<Lit> = meta.input.parse().ok();
            }
            Ok(())
        });
        if value.is_some() {
            return value;
        }
    }
    None
}

/// Check if attribute has a flag like `#[config(skip)]`.
fn has_flag(attrs: &[Attribute], key: &str) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                found = true;
            } else if meta.input.peek(syn::Token![=]) {
                let _ = meta.value();
                let _: Option<Lit> = meta.input.parse().ok();
            }
            Ok(())
        });
        if found {
            return true;
        }
    }
    false
}

/// Extract doc comment from `#[doc = "..."]` attributes.
fn extract_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(nv) = &attr.meta
                && let syn::Expr::Lit(expr_lit) = &nv.value
                && let Lit::Str(s) = &expr_lit.lit
            {
                return Some(s.value());
            }
            None
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n").trim().to_string())
    }
}

// ============================================================================
// helpers
// ============================================================================

/// Convert syn::Type to string representation.
fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

/// Build the full dotted path for a field.
fn join_path(section: &str, field: &str) -> String {
    if section.is_empty() {
        field.to_string()
    } else {
        format!("{section}.{field}")
    }
}

/// Infer section name from struct name: `SiteInfoConfig` → `site_info`.
fn infer_section(name: &str) -> String {
    let base = name.strip_suffix("Config").unwrap_or(name);
    let mut out = String::new();
    for (i, c) in base.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Format a default literal based on field type.
/// Numeric and boolean values pass through; everything else gets quoted.
fn format_default(value: &str, ty: &str) -> String {
    match ty {
        "bool" | "u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64"
        | "isize" | "f32" | "f64" => value.to_string(),
        _ => format!("\"{value}\""),
    }
}
