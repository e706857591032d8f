//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// JSON extractor with automatic validation.
///
/// The body is deserialized first (missing fields and wrong types are
/// reported by serde), then checked with [`Validate`]. Either way the
/// request is rejected with a single message naming the first failing
/// field in [`FieldOrder`], e.g. `"stock must be greater than or equal to 0"`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::{FieldOrder, ValidatedJson};
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Login {
///     #[validate(email(message = "must be a valid email"))]
///     email: String,
/// }
///
/// impl FieldOrder for Login {}
///
/// async fn login(ValidatedJson(payload): ValidatedJson<Login>) -> String {
///     payload.email
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Declared order of a request type's fields.
///
/// When several fields fail, the one listed first here is reported.
/// Nested fields are written as dotted paths (`address.city`); names are
/// matched ignoring case and underscores, so `postalCode` and
/// `postal_code` are the same field. Failing fields that are not listed
/// are reported after the listed ones, in lexical order.
///
/// ```ignore
/// impl FieldOrder for Login {
///     const FIELD_ORDER: &'static [&'static str] = &["email", "password"];
/// }
/// ```
pub trait FieldOrder {
    const FIELD_ORDER: &'static [&'static str] = &[];
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;

        data.validate().map_err(|errors| {
            AppError::Validation(ordered_error_message(&errors, T::FIELD_ORDER))
        })?;

        Ok(ValidatedJson(data))
    }
}

/// Pick one message out of a validation report, visiting fields in lexical
/// order and descending into nested structs.
pub fn first_error_message(errors: &ValidationErrors) -> String {
    ordered_error_message(errors, &[])
}

/// Pick one message out of a validation report, visiting the paths in
/// `order` first. See [`FieldOrder`].
pub fn ordered_error_message(errors: &ValidationErrors, order: &[&str]) -> String {
    order
        .iter()
        .find_map(|path| error_at(errors, path))
        .or_else(|| first_error(errors, None))
        .unwrap_or_else(|| "Request validation failed".to_string())
}

fn same_field(field: &str, wanted: &str) -> bool {
    let mut field = field.chars().filter(|c| *c != '_');
    let mut wanted = wanted.chars().filter(|c| *c != '_');
    loop {
        match (field.next(), wanted.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => {}
            _ => return false,
        }
    }
}

fn describe(path: &str, err: &ValidationError) -> String {
    match &err.message {
        Some(message) => format!("{path} {message}"),
        None => format!("{path} is invalid ({})", err.code),
    }
}

fn error_at(errors: &ValidationErrors, path: &str) -> Option<String> {
    let mut current = errors;
    let mut walked: Vec<String> = Vec::new();
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let (field, kind) = current
            .errors()
            .iter()
            .find(|(field, _)| same_field(field, segment))?;
        walked.push(field.to_string());
        let last = segments.peek().is_none();

        match kind {
            ValidationErrorsKind::Field(list) if last => {
                return list.first().map(|err| describe(&walked.join("."), err));
            }
            ValidationErrorsKind::Struct(nested) if last => {
                return first_error(nested, Some(&walked.join(".")));
            }
            ValidationErrorsKind::Struct(nested) => current = &**nested,
            _ => return None,
        }
    }
    None
}

fn first_error(errors: &ValidationErrors, prefix: Option<&str>) -> Option<String> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields.into_iter().find_map(|(field, kind)| {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|err| describe(&path, err)),
            ValidationErrorsKind::Struct(nested) => first_error(nested, Some(&path)),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, nested)| first_error(nested, Some(&format!("{path}[{index}]")))),
        }
    })
}
