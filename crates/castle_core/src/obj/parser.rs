//! Single-pass document parsing and mesh accumulation.
//!
//! The source format numbers vertices globally across the whole document
//! while the output meshes are numbered per object, so the parser's central
//! bookkeeping is re-basing face indices against a running vertex offset.
//! Two other format adaptations happen here and nowhere else: vertex X is
//! negated (the source convention is left-handed) and each face triple is
//! emitted winding-swapped as `(first, third, second)`.

use glam::{Vec2, Vec3};
use thiserror::Error;

use crate::obj::diagnostic::Diagnostic;
use crate::obj::header::ObjectDescriptor;
use crate::obj::record::Record;

/// Fatal parse failures. Any of these aborts the whole import.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: vertex record `{text}` is not three floats")]
    MalformedVertex { line: usize, text: String },

    #[error("line {line}: uv record `{text}` is not two floats")]
    MalformedUv { line: usize, text: String },

    #[error("line {line}: face record `{text}` does not hold three parsable vertex indices")]
    MalformedFace { line: usize, text: String },

    #[error("line {line}: geometry record before any object header")]
    GeometryBeforeHeader { line: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a document into per-object descriptors.
pub struct ObjParser {
    descriptors: Vec<ObjectDescriptor>,
    diagnostics: Vec<Diagnostic>,
    /// Starts as the implicit stream-start descriptor; dropped silently at
    /// finalization when nothing landed in it.
    current: ObjectDescriptor,
    seen_header: bool,
    /// Vertices contributed by every previously finalized object, valid or
    /// not; the document-global face numbering advances past all of them.
    global_vertex_offset: usize,
}

impl ObjParser {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            diagnostics: Vec::new(),
            current: ObjectDescriptor::default(),
            seen_header: false,
            global_vertex_offset: 0,
        }
    }

    /// Consume every line and return the finalized descriptors plus the
    /// diagnostics recorded while decoding headers.
    pub fn parse<I, S>(lines: I) -> ParseResult<(Vec<ObjectDescriptor>, Vec<Diagnostic>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::new();

        for (index, line) in lines.into_iter().enumerate() {
            parser.consume(index + 1, line.as_ref())?;
        }

        Ok(parser.finish())
    }

    fn consume(&mut self, line: usize, text: &str) -> ParseResult<()> {
        // Tolerate CRLF input.
        let text = text.strip_suffix('\r').unwrap_or(text);

        match Record::classify(text) {
            Record::ObjectHeader(header) => {
                self.finalize_current();
                self.current = ObjectDescriptor::from_header(header, &mut self.diagnostics);
                self.seen_header = true;
            }
            Record::Vertex(rest) => {
                self.require_header(line)?;
                let vertex = parse_vertex(rest).ok_or_else(|| ParseError::MalformedVertex {
                    line,
                    text: rest.to_string(),
                })?;
                self.current.vertices.push(vertex);
            }
            Record::Uv(rest) => {
                self.require_header(line)?;
                let uv = parse_uv(rest).ok_or_else(|| ParseError::MalformedUv {
                    line,
                    text: rest.to_string(),
                })?;
                self.current.uvs.push(uv);
            }
            Record::Face(rest) => {
                self.require_header(line)?;
                let [a, b, c] =
                    self.face_indices(rest)
                        .ok_or_else(|| ParseError::MalformedFace {
                            line,
                            text: rest.to_string(),
                        })?;
                // Winding swap for the target's front-face convention.
                self.current.triangle_indices.extend([a, c, b]);
            }
            Record::Ignored => {}
        }

        Ok(())
    }

    fn require_header(&self, line: usize) -> ParseResult<()> {
        if self.seen_header {
            Ok(())
        } else {
            Err(ParseError::GeometryBeforeHeader { line })
        }
    }

    /// Parse the first three slots of a face record, re-based to the current
    /// object.
    ///
    /// Each slot is `vertex[/uv[/normal]]`; only the leading vertex index is
    /// used. Slots beyond the third are ignored.
    fn face_indices(&self, text: &str) -> Option<[i32; 3]> {
        let mut slots = text.split_whitespace();
        let a = self.rebase(slots.next()?)?;
        let b = self.rebase(slots.next()?)?;
        let c = self.rebase(slots.next()?)?;
        Some([a, b, c])
    }

    /// 1-based document-global index -> 0-based object-local index.
    fn rebase(&self, slot: &str) -> Option<i32> {
        let index: i32 = slot.split('/').next()?.parse().ok()?;
        Some(index - 1 - self.global_vertex_offset as i32)
    }

    fn finalize_current(&mut self) {
        let descriptor = std::mem::take(&mut self.current);

        // Global numbering advances past this object's vertices whether or
        // not the descriptor survives validation later.
        self.global_vertex_offset += descriptor.vertices.len();

        if descriptor.is_empty() {
            return;
        }

        log::debug!(
            "finalized object `{}`: {} vertices, {} triangles",
            descriptor.complete_identifier,
            descriptor.vertices.len(),
            descriptor.triangle_indices.len() / 3
        );
        self.descriptors.push(descriptor);
    }

    fn finish(mut self) -> (Vec<ObjectDescriptor>, Vec<Diagnostic>) {
        self.finalize_current();
        (self.descriptors, self.diagnostics)
    }
}

impl Default for ObjParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `x y z`, mirroring X into the right-handed target convention.
fn parse_vertex(text: &str) -> Option<Vec3> {
    let mut axes = text.split_whitespace();
    let x: f32 = axes.next()?.parse().ok()?;
    let y: f32 = axes.next()?.parse().ok()?;
    let z: f32 = axes.next()?.parse().ok()?;
    Some(Vec3::new(-x, y, z))
}

fn parse_uv(text: &str) -> Option<Vec2> {
    let mut axes = text.split_whitespace();
    let u: f32 = axes.next()?.parse().ok()?;
    let v: f32 = axes.next()?.parse().ok()?;
    Some(Vec2::new(u, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParseResult<(Vec<ObjectDescriptor>, Vec<Diagnostic>)> {
        ObjParser::parse(content.lines())
    }

    #[test]
    fn test_single_object() {
        let (descriptors, diagnostics) = parse(
            "o Name = A\n\
             v 1 2 3\n\
             v 0 0 0\n\
             v 0 1 0\n\
             vt 0.25 0.75\n\
             f 1 2 3\n",
        )
        .unwrap();

        assert!(diagnostics.is_empty());
        assert_eq!(descriptors.len(), 1);

        let descriptor = &descriptors[0];
        // X mirrored, Y and Z pass through.
        assert_eq!(descriptor.vertices[0], Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(descriptor.uvs, vec![Vec2::new(0.25, 0.75)]);
        // (a, b, c) comes out as (a, c, b).
        assert_eq!(descriptor.triangle_indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_rebasing_across_objects() {
        let (descriptors, _) = parse(
            "o A\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f 1 2 3\n\
             o B\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
             f 4 5 6\n\
             f 5 7 6\n",
        )
        .unwrap();

        assert_eq!(descriptors.len(), 2);
        // B's global indices 4..7 re-base against A's 3 vertices.
        assert_eq!(descriptors[1].triangle_indices, vec![0, 2, 1, 1, 2, 3]);
    }

    #[test]
    fn test_offset_counts_every_finalized_object() {
        // A is garbage geometry that validation would reject later, but its
        // vertices still advance the document-global numbering.
        let (descriptors, _) = parse(
            "o A\n\
             v 0 0 0\nv 0 0 0\nv 0 0 0\n\
             f 1 1 1\n\
             o B\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f 4 5 6\n",
        )
        .unwrap();

        assert_eq!(descriptors[1].triangle_indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_face_slots_use_leading_index_only() {
        let (descriptors, _) = parse(
            "o A\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f 1/11/21 2/12/22 3/13/23\n",
        )
        .unwrap();

        assert_eq!(descriptors[0].triangle_indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_face_extra_slots_ignored() {
        let (descriptors, _) = parse(
            "o A\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
             f 1 2 3 4\n",
        )
        .unwrap();

        assert_eq!(descriptors[0].triangle_indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_ignored_records() {
        let (descriptors, _) = parse(
            "# exported scene\n\
             mtllib castle.mtl\n\
             o A\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vn 0 0 1\n\
             s off\n\
             f 1 2 3\n",
        )
        .unwrap();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].triangle_indices.len(), 3);
    }

    #[test]
    fn test_geometry_before_header_is_fatal() {
        let result = parse("v 0 0 0\n");
        assert!(matches!(
            result,
            Err(ParseError::GeometryBeforeHeader { line: 1 })
        ));
    }

    #[test]
    fn test_malformed_vertex_is_fatal() {
        let result = parse("o A\nv 0 zero 0\n");
        assert!(matches!(
            result,
            Err(ParseError::MalformedVertex { line: 2, .. })
        ));
    }

    #[test]
    fn test_malformed_uv_is_fatal() {
        let result = parse("o A\nvt 0.5\n");
        assert!(matches!(result, Err(ParseError::MalformedUv { line: 2, .. })));
    }

    #[test]
    fn test_short_face_is_fatal() {
        let result = parse("o A\nv 0 0 0\nv 1 0 0\nf 1 2\n");
        assert!(matches!(
            result,
            Err(ParseError::MalformedFace { line: 4, .. })
        ));
    }

    #[test]
    fn test_unparsable_face_index_is_fatal() {
        let result = parse("o A\nf x/1 2 3\n");
        assert!(matches!(
            result,
            Err(ParseError::MalformedFace { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_document() {
        let (descriptors, diagnostics) = parse("").unwrap();
        assert!(descriptors.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let (descriptors, _) = parse("o A\r\nv 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n").unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].vertices.len(), 3);
    }

    #[test]
    fn test_header_decode_diagnostics_surface() {
        let (descriptors, diagnostics) = parse(
            "o Name = A - Local position = (bad)\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f 1 2 3\n",
        )
        .unwrap();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(&diagnostics[0], Diagnostic::LocalPosition { .. }));
    }
}
