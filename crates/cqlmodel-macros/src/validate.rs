//! Compile-time validation for Entity derive macro.
//!
//! Errors are collected and reported together, each pointing at the field
//! or struct it concerns.

use std::collections::HashSet;

use proc_macro2::Span;
use syn::{Error, GenericArgument, PathArguments, Type};

use crate::infer;
use crate::parse::{EntityDef, FieldDef};

/// Validate a parsed entity definition.
///
/// Performs all validations and returns combined errors if any issues are found.
pub fn validate_entity(entity: &EntityDef) -> Result<(), Error> {
    let mut errors = Vec::new();

    validate_has_columns(entity, &mut errors);
    validate_table_name(&entity.table_name, entity.name.span(), &mut errors);
    validate_no_duplicate_columns(entity, &mut errors);

    for field in entity.fields.iter().filter(|f| !f.skip) {
        validate_field(field, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let mut combined = errors.remove(0);
        for err in errors {
            combined.combine(err);
        }
        Err(combined)
    }
}

/// Validate that the struct maps at least one column.
fn validate_has_columns(entity: &EntityDef, errors: &mut Vec<Error>) {
    if entity.column_fields().is_empty() {
        errors.push(Error::new(
            entity.name.span(),
            "Entity struct must have at least one non-skipped field",
        ));
    }
}

/// Table names are quoted when emitted, so only emptiness is rejected.
fn validate_table_name(table_name: &str, span: Span, errors: &mut Vec<Error>) {
    if table_name.trim().is_empty() {
        errors.push(Error::new(span, "table name cannot be empty or whitespace"));
    }
}

/// Validate that no two non-skipped fields map to the same column name.
fn validate_no_duplicate_columns(entity: &EntityDef, errors: &mut Vec<Error>) {
    let mut seen_columns: HashSet<&str> = HashSet::new();

    for field in entity.column_fields() {
        if !seen_columns.insert(&field.column_name) {
            errors.push(Error::new(
                field.name.span(),
                format!(
                    "duplicate column name '{}'; another field already maps to this column",
                    field.column_name
                ),
            ));
        }
    }
}

/// Validate a single column field.
fn validate_field(field: &FieldDef, errors: &mut Vec<Error>) {
    let span = field.name.span();

    if field.column_name.is_empty() {
        errors.push(Error::new(span, "column name cannot be empty"));
    }

    if is_nested_option(&field.ty) {
        errors.push(Error::new(
            span,
            "nested Option<Option<T>> is ambiguous and not supported; \
             use a single Option<T>",
        ));
    }

    if matches!(field.ty, Type::Reference(_) | Type::Ptr(_)) {
        errors.push(Error::new(
            span,
            "reference and pointer types are not supported; use owned types instead",
        ));
    }

    match &field.cql_type {
        Some(name) => {
            if infer::parse_cql_type_attr(name).is_none() {
                errors.push(Error::new(span, format!("unknown cql_type '{name}'")));
            }
        }
        None => {
            if infer::infer_cql_type(&field.ty).is_none() {
                errors.push(Error::new(
                    span,
                    "cannot infer the cql_type of this field; \
                     add #[cqlmodel(cql_type = \"...\")]",
                ));
            }
        }
    }
}

/// Check if a type is Option<Option<T>> (nested Option).
fn is_nested_option(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(Type::Path(inner_path))) = args.args.first() {
                        if let Some(inner_seg) = inner_path.path.segments.last() {
                            return inner_seg.ident == "Option";
                        }
                    }
                }
            }
        }
    }
    false
}
