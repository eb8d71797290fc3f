//! CQL kind inference from Rust types.
//!
//! This module maps the Rust types of Entity struct fields to the
//! `CqlType` variant their values convert into.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{GenericArgument, Ident, PathArguments, Type};

/// Infer the kind from a Rust type, returning a TokenStream that names the
/// appropriate `CqlType` variant.
///
/// This handles:
/// - Primitive types (i32, i64, f32, f64, bool)
/// - String types (String, &str)
/// - Binary types (Vec<u8>)
/// - Option<T> (unwraps to inner type)
/// - uuid, chrono, rust_decimal and std::net types
///
/// Returns `None` for types without a known `Value` conversion.
pub fn infer_cql_type(ty: &Type) -> Option<TokenStream> {
    let inner_ty = unwrap_option_type(ty);
    let type_str = type_to_string(inner_ty);

    let variant = match type_str.as_str() {
        "bool" => "Boolean",

        "i32" => "Int",
        "i64" => "Bigint",

        "f32" => "Float",
        "f64" => "Double",

        "String" | "&str" | "str" | "std::string::String" => "Text",

        "Vec<u8>" | "&[u8]" | "[u8]" => "Blob",

        "Uuid" | "uuid::Uuid" => "Uuid",

        "DateTime<Utc>" | "chrono::DateTime<Utc>" | "DateTime<chrono::Utc>"
        | "chrono::DateTime<chrono::Utc>" => "Timestamp",

        "Decimal" | "rust_decimal::Decimal" => "Decimal",

        "IpAddr" | "std::net::IpAddr" => "Inet",

        _ => return None,
    };
    Some(variant_tokens(variant))
}

/// Parse an explicit `cql_type` attribute string into a `CqlType`
/// TokenStream.
///
/// Names are the lowercase dialect names (`ascii`, `timeuuid`, ...),
/// matched case-insensitively. Returns `None` for unknown names.
pub fn parse_cql_type_attr(cql_type: &str) -> Option<TokenStream> {
    let variant = match cql_type.trim().to_ascii_lowercase().as_str() {
        "ascii" => "Ascii",
        "text" => "Text",
        "varchar" => "Varchar",
        "boolean" | "bool" => "Boolean",
        "decimal" => "Decimal",
        "double" => "Double",
        "float" => "Float",
        "counter" => "Counter",
        "bigint" => "Bigint",
        "int" => "Int",
        "varint" => "Varint",
        "timeuuid" => "Timeuuid",
        "uuid" => "Uuid",
        "timestamp" => "Timestamp",
        "blob" => "Blob",
        "inet" => "Inet",
        "list" => "List",
        "set" => "Set",
        "map" => "Map",
        _ => return None,
    };
    Some(variant_tokens(variant))
}

fn variant_tokens(variant: &str) -> TokenStream {
    let ident = Ident::new(variant, Span::call_site());
    quote! { cqlmodel_core::CqlType::#ident }
}

/// Unwrap Option<T> to get the inner type, or return the original type.
fn unwrap_option_type(ty: &Type) -> &Type {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return inner;
                    }
                }
            }
        }
    }
    ty
}

/// Convert a Type to a simplified string representation for matching.
fn type_to_string(ty: &Type) -> String {
    use quote::ToTokens;
    ty.to_token_stream().to_string().replace(' ', "")
}
