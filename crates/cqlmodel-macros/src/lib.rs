//! Procedural macros for CQLModel Rust.
//!
//! `cqlmodel-macros` is the **compile-time codegen layer**. It turns Rust
//! structs into described entities by generating static field metadata and
//! a value snapshot, so the change-tracking layer never inspects types at
//! runtime.
//!
//! These macros are used by application crates via the `cqlmodel` facade.

use proc_macro::TokenStream;
use syn::ext::IdentExt;

mod infer;
mod parse;
mod validate;

use parse::{EntityDef, parse_entity};

/// Derive macro for the `Entity` trait.
///
/// This macro generates implementations for:
/// - Table name
/// - Field information (column names, kinds, primary-key flags)
/// - Value snapshots (`to_row`)
///
/// # Attributes
///
/// - `#[cqlmodel(table = "name")]` - Override table name (defaults to snake_case struct name)
/// - `#[cqlmodel(primary_key)]` - Mark field as part of the primary key
/// - `#[cqlmodel(column = "name")]` - Override column name
/// - `#[cqlmodel(cql_type = "ascii")]` - Override the inferred kind
/// - `#[cqlmodel(skip)]` - Leave this field out of the table mapping
///
/// # Example
///
/// ```ignore
/// use cqlmodel::Entity;
///
/// #[derive(Entity)]
/// #[cqlmodel(table = "TestTable")]
/// struct TestEntry {
///     #[cqlmodel(primary_key)]
///     id: i32,
///
///     value: Option<String>,
///
///     #[cqlmodel(cql_type = "counter")]
///     hits: i64,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(cqlmodel))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let entity = match parse_entity(&input) {
        Ok(e) => e,
        Err(e) => return e.to_compile_error().into(),
    };

    if let Err(e) = validate::validate_entity(&entity) {
        return e.to_compile_error().into();
    }

    generate_entity_impl(&entity).into()
}

/// Generate the Entity trait implementation from parsed entity definition.
fn generate_entity_impl(entity: &EntityDef) -> proc_macro2::TokenStream {
    let name = &entity.name;
    let table_name = &entity.table_name;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();

    let field_infos = generate_field_infos(entity);
    let to_row_body = generate_to_row(entity);

    quote::quote! {
        impl #impl_generics cqlmodel_core::Entity for #name #ty_generics #where_clause {
            const TABLE_NAME: &'static str = #table_name;

            fn fields() -> &'static [cqlmodel_core::FieldInfo] {
                static FIELDS: &[cqlmodel_core::FieldInfo] = &[
                    #field_infos
                ];
                FIELDS
            }

            fn to_row(&self) -> Vec<(&'static str, cqlmodel_core::Value)> {
                #to_row_body
            }
        }
    }
}

fn generate_field_infos(entity: &EntityDef) -> proc_macro2::TokenStream {
    let mut field_ts = Vec::new();

    for field in entity.column_fields() {
        let field_ident = field.name.unraw();
        let column_name = &field.column_name;
        let nullable = field.nullable;
        let primary_key = field.primary_key;

        // Explicit cql_type wins over inference; both were checked by validation.
        let cql_type_ts = field
            .cql_type
            .as_deref()
            .and_then(infer::parse_cql_type_attr)
            .or_else(|| infer::infer_cql_type(&field.ty))
            .unwrap_or_else(|| quote::quote! { cqlmodel_core::CqlType::Text });

        field_ts.push(quote::quote! {
            cqlmodel_core::FieldInfo::new(stringify!(#field_ident), #column_name, #cql_type_ts)
                .nullable(#nullable)
                .primary_key(#primary_key)
        });
    }

    quote::quote! { #(#field_ts),* }
}

/// Generate the to_row method body.
fn generate_to_row(entity: &EntityDef) -> proc_macro2::TokenStream {
    let mut conversions = Vec::new();

    for field in entity.column_fields() {
        let field_name = &field.name;
        let column_name = &field.column_name;

        if field.nullable {
            conversions.push(quote::quote! {
                (#column_name, match &self.#field_name {
                    Some(v) => ::core::convert::Into::<cqlmodel_core::Value>::into(v.clone()),
                    None => cqlmodel_core::Value::Null,
                })
            });
        } else {
            conversions.push(quote::quote! {
                (#column_name, ::core::convert::Into::<cqlmodel_core::Value>::into(self.#field_name.clone()))
            });
        }
    }

    quote::quote! {
        vec![#(#conversions),*]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: syn::DeriveInput) -> String {
        let entity = parse_entity(&input).unwrap();
        generate_entity_impl(&entity).to_string()
    }

    #[test]
    fn test_generated_impl_names_table_and_columns() {
        let out = expand(parse_quote! {
            #[cqlmodel(table = "TestTable")]
            struct TestEntry {
                #[cqlmodel(primary_key)]
                id: i32,
                #[cqlmodel(column = "Value")]
                value: Option<String>,
            }
        });
        assert!(out.contains("impl cqlmodel_core :: Entity for TestEntry"));
        assert!(out.contains("\"TestTable\""));
        assert!(out.contains("\"Value\""));
        assert!(out.contains("primary_key (true)"));
        assert!(out.contains("cqlmodel_core :: Value :: Null"));
    }

    #[test]
    fn test_generated_impl_omits_skipped_fields() {
        let out = expand(parse_quote! {
            struct Entry {
                id: i32,
                #[cqlmodel(skip)]
                scratch: Vec<String>,
            }
        });
        assert!(!out.contains("scratch"));
    }

    #[test]
    fn test_explicit_cql_type_used() {
        let out = expand(parse_quote! {
            struct Entry {
                #[cqlmodel(cql_type = "ascii")]
                code: String,
            }
        });
        assert!(out.contains("CqlType :: Ascii"));
        assert!(!out.contains("CqlType :: Text"));
    }

    #[test]
    fn test_generics_are_carried() {
        let out = expand(parse_quote! {
            struct Entry<T: Clone + Into<cqlmodel_core::Value>> {
                #[cqlmodel(cql_type = "text")]
                value: T,
            }
        });
        assert!(out.contains("for Entry < T >"));
    }
}
