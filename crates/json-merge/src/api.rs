//! Document-level operations.
//!
//! Each operation converts its arguments to canonical values up front, runs
//! an engine, and converts the result back into the target's
//! representation. Any conversion failure aborts the operation before a
//! result is produced.

use json_merge_util::type_name;
use serde_json::Value;
use tracing::debug;

use crate::diff::generate_patch;
use crate::document::{Document, ToCanonical};
use crate::error::{in_role, Error, Role};
use crate::isolation::{Isolation, MergeOptions, Merged};
use crate::merge::{apply_patch, apply_patch_mut};

/// Media type for merge patch bodies (RFC 7386 §4).
pub const MEDIA_TYPE: &str = "application/merge-patch+json";

/// Applies `patch` to a copy of `target`.
///
/// `target` is only read, so any number of threads may merge against the
/// same shared target at once.
///
/// # Examples
///
/// ```
/// use json_merge::merge;
///
/// let merged = merge(
///     &String::from(r#"{"name":"John","age":30}"#),
///     r#"{"age":31,"city":"NYC"}"#,
/// ).unwrap();
/// assert_eq!(merged.doc(), r#"{"name":"John","age":31,"city":"NYC"}"#);
/// ```
pub fn merge<'a, T, P>(target: &T, patch: &P) -> Result<Merged<'a, T>, Error>
where
    T: Document,
    P: ToCanonical + ?Sized,
{
    let target_value = target.to_canonical().map_err(in_role(Role::Target))?;
    let patch_value = patch.to_canonical().map_err(in_role(Role::Patch))?;
    debug!(
        isolation = ?Isolation::Copy,
        target = type_name(&target_value),
        patch = type_name(&patch_value),
        "applying merge patch"
    );
    let merged = apply_patch(target_value, &patch_value);
    let doc = T::from_canonical(merged).map_err(in_role(Role::Result))?;
    Ok(Merged::owned(doc))
}

/// Applies `patch` under the isolation chosen by `options`.
///
/// With `mutate` unset this behaves like [`merge`] and leaves `target` as it
/// was. With `mutate` set the merged document is written into `target` and
/// the result borrows it.
///
/// The isolation is only known at run time, so the result keeps `target`
/// mutably borrowed under either policy. Call [`Merged::into_doc`] to end
/// the borrow, or use [`merge`] when a copy is always wanted.
///
/// ```
/// use serde_json::json;
/// use json_merge::{merge_with, MergeOptions};
///
/// let mut target = json!({"a": 1});
/// let merged = merge_with(&mut target, &json!({"a": 2}), &MergeOptions::default())
///     .unwrap()
///     .into_doc();
/// assert_eq!(target, json!({"a": 1}));
/// assert_eq!(merged, json!({"a": 2}));
/// ```
pub fn merge_with<'a, T, P>(
    target: &'a mut T,
    patch: &P,
    options: &MergeOptions,
) -> Result<Merged<'a, T>, Error>
where
    T: Document,
    P: ToCanonical + ?Sized,
{
    match options.isolation() {
        Isolation::Copy => merge(&*target, patch),
        Isolation::Mutate => {
            merge_in_place(target, patch)?;
            Ok(Merged::target(target))
        }
    }
}

/// Applies `patch` directly to `target`.
///
/// On error `target` keeps its previous value.
pub fn merge_in_place<T, P>(target: &mut T, patch: &P) -> Result<(), Error>
where
    T: Document,
    P: ToCanonical + ?Sized,
{
    let patch_value = patch.to_canonical().map_err(in_role(Role::Patch))?;
    debug!(
        isolation = ?Isolation::Mutate,
        patch = type_name(&patch_value),
        "applying merge patch"
    );
    target.merge_canonical(&patch_value)
}

/// Applies `patches` in order to a copy of `target`.
///
/// Every patch is converted before any is applied, so a bad patch late in
/// the list fails the whole call.
pub fn merge_many<'a, T, P>(target: &T, patches: &[P]) -> Result<Merged<'a, T>, Error>
where
    T: Document,
    P: ToCanonical,
{
    let patch_values = patches
        .iter()
        .map(|patch| patch.to_canonical().map_err(in_role(Role::Patch)))
        .collect::<Result<Vec<Value>, Error>>()?;
    let mut merged = target.to_canonical().map_err(in_role(Role::Target))?;
    debug!(patches = patch_values.len(), "applying merge patches");
    for patch_value in &patch_values {
        apply_patch_mut(&mut merged, patch_value);
    }
    let doc = T::from_canonical(merged).map_err(in_role(Role::Result))?;
    Ok(Merged::owned(doc))
}

/// Generates the merge patch that turns `source` into `target`, in the
/// same representation as both.
///
/// ```
/// use serde_json::json;
/// use json_merge::generate;
///
/// let patch = generate(
///     &json!({"name": "John", "age": 30, "city": "NYC"}),
///     &json!({"name": "Jane", "age": 30}),
/// ).unwrap();
/// assert_eq!(patch, json!({"name": "Jane", "city": null}));
/// ```
pub fn generate<T: Document>(source: &T, target: &T) -> Result<T, Error> {
    let source_value = source.to_canonical().map_err(in_role(Role::Source))?;
    let target_value = target.to_canonical().map_err(in_role(Role::Target))?;
    debug!(
        source = type_name(&source_value),
        target = type_name(&target_value),
        "generating merge patch"
    );
    let patch = generate_patch(&source_value, &target_value);
    T::from_canonical(patch).map_err(in_role(Role::Result))
}

/// Reports whether `candidate` is a valid merge patch.
///
/// Any JSON value is a valid patch, `null` included, so this only fails for
/// documents that do not convert at all, such as malformed JSON bytes.
///
/// ```
/// use json_merge::valid;
///
/// assert!(valid(r#"{"name": "Jane"}"#));
/// assert!(valid(b"null".as_slice()));
/// assert!(!valid(b"{invalid}".as_slice()));
/// ```
pub fn valid<T: ToCanonical + ?Sized>(candidate: &T) -> bool {
    match candidate.to_canonical() {
        Ok(_) => true,
        Err(err) => {
            debug!(kind = ?err.kind(), error = %err, "invalid merge patch");
            false
        }
    }
}
