//! Wavefront OBJ export

use anyhow::{Context, Result};
use glam::Vec3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Mesh;

/// One `o` record: a named mesh and the location it is moved to
#[derive(Debug, Clone, Copy)]
pub struct ObjObject<'a> {
    pub name: &'a str,
    pub mesh: &'a Mesh,
    pub offset: Vec3,
}

impl<'a> ObjObject<'a> {
    pub fn new(name: &'a str, mesh: &'a Mesh, offset: Vec3) -> Self {
        Self { name, mesh, offset }
    }
}

/// Writes meshes as one Wavefront OBJ file in world space.
///
/// Each object gets its own `o` record with its vertices moved by its
/// offset. Faces are written as-is (quads stay quads); indices are 1-based
/// and count across the whole file.
pub fn write_obj<W: Write>(mut out: W, objects: &[ObjObject<'_>]) -> Result<()> {
    let vertices: usize = objects.iter().map(|o| o.mesh.vertex_count()).sum();
    let faces: usize = objects.iter().map(|o| o.mesh.face_count()).sum();
    writeln!(
        out,
        "# meatball-gen {} ({})",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().to_rfc3339()
    )?;
    writeln!(
        out,
        "# {} object(s), {} vertices, {} faces",
        objects.len(),
        vertices,
        faces
    )?;

    let mut base = 1;
    for object in objects {
        writeln!(out, "o {}", object.name)?;
        for p in &object.mesh.positions {
            let w = *p + object.offset;
            writeln!(out, "v {:.6} {:.6} {:.6}", w.x, w.y, w.z)?;
        }
        for face in &object.mesh.faces {
            write!(out, "f")?;
            for &i in face {
                write!(out, " {}", i as usize + base)?;
            }
            writeln!(out)?;
        }
        base += object.mesh.vertex_count();
    }

    out.flush()?;
    Ok(())
}

/// Exports meshes to an OBJ file on disk
pub fn save_obj(path: impl AsRef<Path>, objects: &[ObjObject<'_>]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).context(format!("Failed to create OBJ file: {:?}", path))?;
    write_obj(BufWriter::new(file), objects)
        .context(format!("Failed to write OBJ file: {:?}", path))?;
    log::info!("Wrote {} object(s) to {:?}", objects.len(), path);
    Ok(())
}
