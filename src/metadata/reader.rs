use super::collection::Metadata;

/// A format-specific decoder that populates one directory kind.
///
/// Readers capture their raw bytes at construction. `extract` never fails:
/// decoding problems are recorded on the target directory with
/// [`Directory::add_error`](super::Directory::add_error), and calling it again
/// re-derives the same tags from the same bytes.
pub trait MetadataReader {
    fn extract(&self, metadata: &mut Metadata);
}
