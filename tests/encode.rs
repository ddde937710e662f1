//! Byte-level checks of the MYGEO v3 writer.

use mygeo::{ser::v3, Error, Flags, Mesh, Position, Primitive, Space, Texcoord, UvBinding};

fn triangle() -> Mesh {
    Mesh::new(
        vec![
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(0.0, 1.0, 0.0),
        ],
        vec![Primitive::new(vec![0, 1, 2])],
    )
}

fn u32s(bytes: &mut Vec<u8>, values: &[u32]) {
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
}

fn f32s(bytes: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
}

fn flags_of(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes[16..20].try_into().unwrap())
}

#[test]
fn single_triangle_is_76_bytes() {
    let bytes = v3::encode(&triangle()).unwrap();

    let mut expected = b"MYGEOv3\n".to_vec();
    u32s(&mut expected, &[3, 1, 0]);
    expected.extend_from_slice(&[0, 0, 0, 0]);
    f32s(&mut expected, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    u32s(&mut expected, &[3, 0, 1, 2]);

    assert_eq!(bytes.len(), 76);
    assert_eq!(bytes, expected);
}

#[test]
fn header_flag_bits() {
    let mut mesh = triangle();
    mesh.primitives[0].uvs = vec![Texcoord::new(0.0, 0.0); 3];

    mesh.uv = Some(UvBinding::PerCorner);
    assert_eq!(flags_of(&v3::encode(&mesh).unwrap()), 0b11);

    mesh.uv = Some(UvBinding::PerPoint);
    assert_eq!(flags_of(&v3::encode(&mesh).unwrap()), 0b01);

    mesh.uv = None;
    assert_eq!(flags_of(&v3::encode(&mesh).unwrap()), 0);
}

#[test]
fn space_byte_and_reserved_bytes() {
    let mut mesh = triangle();
    mesh.space = Space::World;
    let bytes = v3::encode(&mesh).unwrap();
    assert_eq!(&bytes[20..24], &[1, 0, 0, 0]);
}

#[test]
fn empty_primitive_is_a_bare_zero_count() {
    let mut mesh = triangle();
    mesh.primitives.push(Primitive::default());
    mesh.primitives.push(Primitive::new(vec![2, 1, 0]));
    let bytes = v3::encode(&mesh).unwrap();

    assert_eq!(bytes.len(), 76 + 4 + 16);
    assert_eq!(&bytes[76..80], &0u32.to_le_bytes());
    assert_eq!(&bytes[80..84], &3u32.to_le_bytes());
}

#[test]
fn empty_primitive_with_uvs_has_no_uv_bytes() {
    let mesh = Mesh {
        uv: Some(UvBinding::PerCorner),
        ..Mesh::new(Vec::new(), vec![Primitive::default()])
    };
    let bytes = v3::encode(&mesh).unwrap();
    assert_eq!(bytes.len(), 24 + 4);
}

#[test]
fn uvs_are_interleaved_per_primitive() {
    let mesh = Mesh {
        points: vec![Position::origin(); 2],
        primitives: vec![
            Primitive::with_uvs(vec![0], vec![Texcoord::new(0.25, 0.5)]),
            Primitive::with_uvs(
                vec![1, 0],
                vec![Texcoord::new(1.0, 2.0), Texcoord::new(3.0, 4.0)],
            ),
        ],
        uv: Some(UvBinding::PerPoint),
        space: Space::Object,
    };
    let bytes = v3::encode(&mesh).unwrap();

    let mut expected = Vec::new();
    u32s(&mut expected, &[1, 0]);
    f32s(&mut expected, &[0.25, 0.5]);
    u32s(&mut expected, &[2, 1, 0]);
    f32s(&mut expected, &[1.0, 2.0, 3.0, 4.0]);

    let prims = 24 + 2 * 12;
    assert_eq!(&bytes[prims..], expected.as_slice());
}

#[test]
fn uv_count_mismatch_is_rejected() {
    let mut mesh = triangle();
    mesh.uv = Some(UvBinding::PerCorner);
    mesh.primitives[0].uvs = vec![Texcoord::origin()];
    assert!(matches!(
        v3::encode(&mesh),
        Err(Error::UvCountMismatch {
            primitive: 0,
            corners: 3,
            uvs: 1
        })
    ));
}

#[test]
fn out_of_range_indices_are_written_as_given() {
    let mut mesh = triangle();
    mesh.primitives[0].indices = vec![0, 1, 99];
    let bytes = v3::encode(&mesh).unwrap();
    assert_eq!(&bytes[72..76], &99u32.to_le_bytes());
    assert!(mesh.validate().is_err());
}

#[test]
fn header_for_matches_mesh() {
    let mut mesh = triangle();
    mesh.uv = Some(UvBinding::PerPoint);
    let header = v3::header_for(&mesh).unwrap();
    assert_eq!(&header.magic, b"MYGEOv3\n");
    assert_eq!(header.point_count, 3);
    assert_eq!(header.prim_count, 1);
    assert_eq!(header.flags, Flags::UV_PRESENT);
}

#[test]
fn write_file_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/tri.mygbin");

    let written = v3::write_file(&triangle(), &path).unwrap();

    assert_eq!(written, path);
    assert_eq!(std::fs::read(&path).unwrap(), v3::encode(&triangle()).unwrap());
}

#[test]
fn write_file_rejects_empty_path() {
    assert!(matches!(
        v3::write_file(&triangle(), ""),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn write_file_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    // a directory can't be opened for writing
    assert!(matches!(
        v3::write_file(&triangle(), dir.path()),
        Err(Error::Io(_))
    ));
}
