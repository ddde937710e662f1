//! MYGEO v2 and v3 readers.

use mygeo::{
    de::{v2, v3},
    ser, Error, Flags, Mesh, Position, Primitive, Revision, Space, Texcoord, UvBinding,
};

/// Hand-assemble a revision 2 file.
fn v2_file(points: &[[f32; 3]], prims: &[&[u32]], flags: u32, space: u8) -> Vec<u8> {
    let mut bytes = b"MYGEOv2\n".to_vec();
    bytes.extend_from_slice(&(points.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(prims.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&flags.to_le_bytes());
    bytes.extend_from_slice(&[space, 0, 0, 0]);
    for p in points {
        for c in p {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
    }
    for prim in prims {
        bytes.extend_from_slice(&(prim.len() as u32).to_le_bytes());
        for i in *prim {
            bytes.extend_from_slice(&i.to_le_bytes());
        }
    }
    bytes
}

fn quad_and_triangle() -> Vec<u8> {
    v2_file(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.5],
        ],
        &[&[0, 1, 2, 3], &[0, 2, 3]],
        0,
        1,
    )
}

#[test]
fn reads_v2_file() {
    let doc = v2::decode(&quad_and_triangle()).unwrap();

    assert_eq!(&doc.header.magic, b"MYGEOv2\n");
    assert_eq!(doc.header.revision(), Some(Revision::V2));
    assert_eq!(doc.header.point_count, 4);
    assert_eq!(doc.header.prim_count, 2);
    assert_eq!(doc.header.flags, Flags::NONE);
    assert_eq!(doc.header.space, Space::World);
    assert_eq!(doc.points[3], Position::new(0.0, 1.0, 0.5));
    assert_eq!(doc.primitives[0].indices, vec![0, 1, 2, 3]);
    assert_eq!(doc.primitives[1].indices, vec![0, 2, 3]);
    assert!(doc.primitives.iter().all(|p| p.uvs.is_empty()));
}

#[test]
fn v2_space_byte_other_than_one_is_object() {
    for byte in [0, 2, 255] {
        let doc = v2::decode(&v2_file(&[], &[], 0, byte)).unwrap();
        assert_eq!(doc.header.space, Space::Object);
    }
}

#[test]
fn v2_never_reads_uv_blocks() {
    // flags claim UVs, but revision 2 has no UV block; the second record must still parse as
    // indices
    let bytes = v2_file(&[[0.0; 3]; 3], &[&[0, 1, 2], &[2, 1, 0]], 0b11, 0);
    let doc = v2::decode(&bytes).unwrap();

    assert_eq!(doc.header.flags.bits(), 0b11);
    assert_eq!(doc.primitives[1].indices, vec![2, 1, 0]);

    let mesh = Mesh::from(doc);
    assert_eq!(mesh.uv, None);
}

#[test]
fn v2_degenerate_primitive() {
    let doc = v2::decode(&v2_file(&[[0.0; 3]], &[&[], &[0]], 0, 0)).unwrap();
    assert_eq!(doc.primitives[0], Primitive::default());
    assert_eq!(doc.primitives[1].indices, vec![0]);
}

#[test]
fn v2_does_not_validate_indices() {
    let doc = v2::decode(&v2_file(&[[0.0; 3]], &[&[0, 7]], 0, 0)).unwrap();
    assert_eq!(doc.primitives[0].indices, vec![0, 7]);

    let mesh = Mesh::from(doc);
    assert!(matches!(
        mesh.validate(),
        Err(Error::IndexOutOfRange {
            primitive: 0,
            corner: 1,
            index: 7,
            point_count: 1
        })
    ));
}

#[test]
fn wrong_magic_reports_found_bytes() {
    let mut bytes = quad_and_triangle();
    bytes[..8].copy_from_slice(b"MYGEOv3\n");

    match v2::decode(&bytes) {
        Err(Error::Format { expected, found }) => {
            assert_eq!(expected, Revision::V2);
            assert_eq!(found, b"MYGEOv3\n");
        }
        other => panic!("expected format error, got {other:?}"),
    }

    let msg = v2::decode(&bytes).unwrap_err().to_string();
    assert!(msg.starts_with("Not a MYGEO v2 file"), "{msg}");
    assert!(msg.contains("MYGEOv3\\n"), "{msg}");
}

#[test]
fn short_magic_is_a_format_error() {
    match v2::decode(b"MYG") {
        Err(Error::Format { found, .. }) => assert_eq!(found, b"MYG"),
        other => panic!("expected format error, got {other:?}"),
    }
    assert!(matches!(v2::decode(&[]), Err(Error::Format { .. })));
}

#[test]
fn every_truncation_is_detected() {
    let bytes = quad_and_triangle();
    for len in 8..bytes.len() {
        match v2::decode(&bytes[..len]) {
            Err(Error::Truncated { offset, .. }) => assert!(offset <= len as u64),
            other => panic!("truncated to {len} bytes, got {other:?}"),
        }
    }
    assert!(v2::decode(&bytes).is_ok());
}

#[test]
fn truncation_names_the_field() {
    let bytes = quad_and_triangle();
    // cut inside the first primitive's index list
    let header_and_points = 24 + 4 * 12;
    let cut = header_and_points + 4 + 2 * 4 + 1;
    match v2::decode(&bytes[..cut]) {
        Err(Error::Truncated { field, offset }) => {
            assert_eq!(field, "point index");
            assert_eq!(offset, (header_and_points + 4 + 2 * 4) as u64);
        }
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn huge_declared_counts_fail_without_allocating_them() {
    let mut bytes = v2_file(&[], &[], 0, 0);
    bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(
        v2::decode(&bytes),
        Err(Error::Truncated { field: "point x", offset: 24 })
    ));
}

#[test]
fn read_file_uses_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.hou");
    std::fs::write(&path, quad_and_triangle()).unwrap();

    let doc = v2::read_file(&path).unwrap();
    assert_eq!(doc.points.len(), 4);

    assert!(matches!(
        v2::read_file(dir.path().join("missing")),
        Err(Error::Io(_))
    ));
}

fn textured_quad() -> Mesh {
    Mesh {
        points: vec![
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(1.0, 1.0, 0.0),
            Position::new(0.0, 1.0, 0.0),
        ],
        primitives: vec![
            Primitive::with_uvs(
                vec![0, 1, 2, 3],
                vec![
                    Texcoord::new(0.0, 0.0),
                    Texcoord::new(1.0, 0.0),
                    Texcoord::new(1.0, 1.0),
                    Texcoord::new(0.0, 1.0),
                ],
            ),
            Primitive::default(),
        ],
        uv: Some(UvBinding::PerCorner),
        space: Space::World,
    }
}

#[test]
fn v3_reads_what_the_writer_writes() {
    let mesh = textured_quad();
    let doc = v3::decode(&ser::v3::encode(&mesh).unwrap()).unwrap();

    assert_eq!(doc.header.revision(), Some(Revision::V3));
    assert_eq!(doc.header.flags, Flags::UV_PRESENT | Flags::UV_IS_PER_CORNER);
    assert_eq!(Mesh::from(doc), mesh);
}

#[test]
fn revisions_reject_each_other() {
    let v3_bytes = ser::v3::encode(&textured_quad()).unwrap();
    assert!(matches!(
        v2::decode(&v3_bytes),
        Err(Error::Format {
            expected: Revision::V2,
            ..
        })
    ));
    assert!(matches!(
        v3::decode(&quad_and_triangle()),
        Err(Error::Format {
            expected: Revision::V3,
            ..
        })
    ));
}

#[test]
fn v3_truncated_inside_uv_block() {
    let bytes = ser::v3::encode(&textured_quad()).unwrap();
    // drop the empty primitive and half of the final v
    let cut = bytes.len() - 4 - 2;
    assert!(matches!(
        v3::decode(&bytes[..cut]),
        Err(Error::Truncated { field: "uv v", .. })
    ));
}
