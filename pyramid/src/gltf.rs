// gltf.rs      glTF module
//
// Copyright (c) 2022-2024  Douglas Lau
//
use crate::camera::Camera;
use crate::frame::Frame;
use glam::Vec4;
use serde_json::{json, Value};
use serde_repr::Serialize_repr;
use std::io::{Result, Write};
use std::mem::size_of;

/// Component types for glTF accessor
#[derive(Serialize_repr)]
#[repr(u32)]
#[allow(unused)]
enum ComponentType {
    I8 = 5120,
    U8 = 5121,
    I16 = 5122,
    U16 = 5123,
    U32 = 5125,
    F32 = 5126,
}

/// Target for glTF buffer view
#[derive(Serialize_repr)]
#[repr(u32)]
enum Target {
    ArrayBuffer = 34962,
    ElementArrayBuffer = 34963,
}

/// Primitive modes for glTF mesh
#[derive(Clone, Copy, Serialize_repr)]
#[repr(u32)]
enum Mode {
    Lines = 1,
    LineStrip = 3,
    Triangles = 4,
}

/// Builder for glTF
#[derive(Default)]
struct Builder {
    bin: Vec<u8>,
    views: Vec<Value>,
    accessors: Vec<Value>,
    meshes: Vec<Value>,
    cameras: Vec<Value>,
    camera_nodes: Vec<Value>,
}

/// GLB writer
struct Glb<W: Write> {
    writer: W,
}

/// Transmute a slice of `T` to a slice of `u8`
fn as_u8_slice<T: Sized>(p: &[T]) -> &[u8] {
    let (_head, body, _tail) = unsafe { p.align_to::<u8>() };
    body
}

/// Convert homogeneous points to XYZ triples
fn xyz(points: &[Vec4]) -> Vec<[f32; 3]> {
    points.iter().map(|p| p.truncate().to_array()).collect()
}

/// Get minimum and maximum of XYZ triples
fn bounds(points: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in points {
        for i in 0..3 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }
    (min, max)
}

impl Builder {
    /// Add a position accessor, returning its index
    fn add_positions(&mut self, points: &[Vec4]) -> usize {
        let pos = xyz(points);
        let (min, max) = bounds(&pos);
        let accessor = self.accessors.len();
        self.accessors.push(json!({
            "bufferView": self.views.len(),
            "componentType": ComponentType::F32,
            "type": "VEC3",
            "count": pos.len(),
            "min": min,
            "max": max,
        }));
        let v = self.push_array_view(&pos);
        self.views.push(v);
        accessor
    }

    /// Add a normal accessor, returning its index
    fn add_normals(&mut self, normals: &[Vec4]) -> usize {
        let norm = xyz(normals);
        let accessor = self.accessors.len();
        self.accessors.push(json!({
            "bufferView": self.views.len(),
            "componentType": ComponentType::F32,
            "type": "VEC3",
            "count": norm.len(),
        }));
        let v = self.push_array_view(&norm);
        self.views.push(v);
        accessor
    }

    /// Add an index accessor, returning its index
    fn add_indices(&mut self, indices: &[u32]) -> usize {
        let accessor = self.accessors.len();
        self.accessors.push(json!({
            "bufferView": self.views.len(),
            "componentType": ComponentType::U32,
            "type": "SCALAR",
            "count": indices.len(),
        }));
        let v = self.push_index_view(indices);
        self.views.push(v);
        accessor
    }

    /// Add the sphere mesh
    fn add_sphere(&mut self, frame: &Frame) {
        let pos = self.add_positions(frame.positions);
        let norm = self.add_normals(frame.normals);
        let segments = frame.line_segments();
        let primitive = if segments.is_empty() {
            json!({
                "attributes": {
                    "POSITION": pos,
                    "NORMAL": norm,
                },
                "mode": Mode::Triangles,
            })
        } else {
            let indices: Vec<u32> =
                segments.iter().flatten().map(|i| *i as u32).collect();
            let idx = self.add_indices(&indices);
            json!({
                "attributes": {
                    "POSITION": pos,
                    "NORMAL": norm,
                },
                "indices": idx,
                "mode": Mode::Lines,
            })
        };
        self.meshes.push(json!({
            "name": "sphere",
            "primitives": [primitive],
            "extras": {
                "shading": frame.sphere.shading,
            },
        }));
    }

    /// Add the curve line strip
    fn add_curve(&mut self, frame: &Frame) {
        let pos = self.add_positions(frame.curve);
        self.meshes.push(json!({
            "name": "curve",
            "primitives": [{
                "attributes": {
                    "POSITION": pos,
                },
                "mode": Mode::LineStrip,
            }],
        }));
    }

    /// Add a perspective camera, placed by its view matrix
    fn add_camera(&mut self, camera: &Camera) {
        let matrix = camera.view().inverse().to_cols_array();
        self.camera_nodes.push(json!({
            "name": "camera",
            "camera": self.cameras.len(),
            "matrix": matrix,
        }));
        self.cameras.push(json!({
            "type": "perspective",
            "perspective": {
                "yfov": camera.fov().to_radians(),
                "aspectRatio": camera.aspect(),
                "znear": Camera::NEAR,
                "zfar": Camera::FAR,
            },
        }));
    }

    /// Push an index view
    fn push_index_view<V>(&mut self, buf: &[V]) -> Value {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let byte_offset = self.bin.len();
        let bytes = as_u8_slice(buf);
        self.bin.extend_from_slice(bytes);
        // no byteStride for index view
        json!({
            "buffer": 0,
            "byteLength": bytes.len(),
            "byteOffset": byte_offset,
            "target": Target::ElementArrayBuffer,
        })
    }

    /// Push an array view
    fn push_array_view<V>(&mut self, buf: &[V]) -> Value {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let byte_offset = self.bin.len();
        let bytes = as_u8_slice(buf);
        self.bin.extend_from_slice(bytes);
        json!({
            "buffer": 0,
            "byteLength": bytes.len(),
            "byteOffset": byte_offset,
            "byteStride": size_of::<V>(),
            "target": Target::ArrayBuffer,
        })
    }

    /// Get root JSON of glTF
    fn json(&self) -> Value {
        let mut nodes: Vec<Value> = (0..self.meshes.len())
            .map(|mesh| json!({ "mesh": mesh }))
            .collect();
        nodes.extend(self.camera_nodes.iter().cloned());
        let scene_nodes: Vec<usize> = (0..nodes.len()).collect();
        json!({
            "asset": {
                "version": "2.0"
            },
            "buffers": [{
                "byteLength": self.bin.len(),
            }],
            "bufferViews": self.views,
            "accessors": self.accessors,
            "meshes": self.meshes,
            "cameras": self.cameras,
            "nodes": nodes,
            "scenes": [{
                "nodes": scene_nodes
            }],
        })
    }

    /// Get binary buffer
    fn bin(&self) -> &[u8] {
        &self.bin
    }
}

/// Export a frame to a writer as a GLB
///
/// The sphere and the curve become two meshes, each with its own node.  The
/// frame's camera gets a third node.
pub fn export<W: Write>(writer: W, frame: &Frame) -> Result<()> {
    let mut builder = Builder::default();
    builder.add_sphere(frame);
    builder.add_curve(frame);
    builder.add_camera(&frame.camera);
    let bin = builder.bin();
    let mut root_json = builder.json().to_string();
    while root_json.len() % 4 != 0 {
        root_json.push(' ');
    }
    let len = u32::try_from(root_json.len() + bin.len())
        .map_err(|_| std::io::ErrorKind::InvalidData)?;
    let mut glb = Glb::new(writer);
    glb.write_header(2, len)?;
    glb.write_json(&root_json)?;
    glb.write_bin(bin)?;
    Ok(())
}

impl<W: Write> Glb<W> {
    /// Create new GLB writer
    fn new(writer: W) -> Self {
        Glb { writer }
    }

    /// Write GLB header
    fn write_header(&mut self, chunks: u32, len: u32) -> Result<()> {
        let total_len = 12 + chunks * 8 + len;
        self.writer.write_all(b"glTF")?;
        self.writer.write_all(&2u32.to_le_bytes())?;
        self.writer.write_all(&total_len.to_le_bytes())?;
        Ok(())
    }

    /// Write one chunk
    fn write_chunk(&mut self, ctype: &[u8], data: &[u8]) -> Result<()> {
        let len = u32::try_from(data.len())
            .map_err(|_| std::io::ErrorKind::InvalidData)?;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(ctype)?;
        self.writer.write_all(data)?;
        Ok(())
    }

    /// Write a JSON chunk
    fn write_json(&mut self, json: &str) -> Result<()> {
        self.write_chunk(b"JSON", json.as_bytes())
    }

    /// Write a BIN chunk
    fn write_bin(&mut self, bin: &[u8]) -> Result<()> {
        self.write_chunk(b"BIN\0", bin)
    }
}
