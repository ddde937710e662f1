use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use mygeo::{
    de::{self, Document},
    source::{self, ExportOptions},
    Mesh,
};
use mygeo_scene::{de::obj, NodeParent, Scene};
use nalgebra::Matrix4;

mod cli;
use cli::{Cli, Command, ExportArgs, InspectArgs, RevisionArg};

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Codec(#[from] mygeo::Error),
    #[error(transparent)]
    Scene(#[from] mygeo_scene::Error),
    #[error("{0:?} contains no objects")]
    NoObjects(PathBuf),
}

/// The path of the node to export: the named object, or the first one under the OBJ root.
fn export_path(scene: &Scene, args: &ExportArgs) -> Result<String, Error> {
    if let Some(name) = &args.node {
        return Ok(format!("/{}/{name}", obj::ROOT_NODE));
    }
    scene
        .nodes()
        .find(|n| matches!(n.parent(), NodeParent::Node(_)))
        .map(|n| n.path().to_owned())
        .ok_or_else(|| Error::NoObjects(args.input.clone()))
}

fn export(args: ExportArgs) -> Result<(), Error> {
    let mut scene = obj::load(&args.input)?;
    let node_path = export_path(&scene, &args)?;

    let xf = Matrix4::new_translation(&args.translate)
        * Matrix4::new_nonuniform_scaling(&args.scale.vector);
    let xf = scene.add_transform(xf);
    let root = scene
        .find(&format!("/{}", obj::ROOT_NODE))
        .ok_or_else(|| Error::NoObjects(args.input.clone()))?;
    scene.set_node_transform(root, Some(xf))?;

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("mygbin"));
    let summary = source::export(
        &scene,
        &node_path,
        &output,
        &ExportOptions {
            space: args.space.into(),
        },
    )?;
    println!("{summary}");
    Ok(())
}

fn print_document(doc: &Document) {
    let header = &doc.header;
    println!("Magic: b\"{}\"", header.magic.escape_ascii());
    println!(
        "Header: {} points, {} prims, {}",
        header.point_count, header.prim_count, header.space
    );
    println!("Flags: {:#x}", header.flags.bits());
    match doc.first_point() {
        Some(p) => println!("First point: ({}, {}, {})", p.x, p.y, p.z),
        None => println!("First point: none"),
    }
    match doc.first_primitive() {
        Some(prim) => println!("First prim: {:?}", prim.indices),
        None => println!("First prim: none"),
    }
}

fn inspect(args: InspectArgs) -> Result<(), Error> {
    let doc = match args.revision {
        RevisionArg::V2 => de::v2::read_file(&args.file)?,
        RevisionArg::V3 => de::v3::read_file(&args.file)?,
    };
    print_document(&doc);

    let mesh = Mesh::from(doc);
    if args.strict {
        mesh.validate()?;
    }
    println!("Triangles: {}", mesh.triangles().count());
    Ok(())
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let res = match cli.command {
        Command::Export(args) => export(args),
        Command::Inspect(args) => inspect(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
