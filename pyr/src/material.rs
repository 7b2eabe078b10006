// material.rs  Pyramid material module
//
// Copyright (c) 2024  Douglas Lau
//
use bevy::{
    asset::load_internal_asset,
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    render::{
        mesh::MeshVertexBufferLayout,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError,
        },
    },
};
use pyramid::Uniforms;

/// Handle for the embedded shader
const PYRAMID_SHADER: Handle<Shader> =
    Handle::weak_from_u128(0x5a1c_2e4f_83b6_4d0a_9c7e_1f20_64ab_d3e9);

/// Plugin for pyramid material
pub struct PyramidMaterialPlugin;

/// Shader uniforms (must match `pyramid.wgsl`, bind group 2)
#[derive(Clone, Copy, Debug, Default, ShaderType)]
pub struct PyramidUniforms {
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
    light: Vec4,
    shininess: f32,
    shading: u32,
    wireframe: u32,
    lit: u32,
}

/// Material with Gouraud / Phong lighting
#[derive(Asset, AsBindGroup, Clone, Debug, TypePath)]
pub struct PyramidMaterial {
    #[uniform(0)]
    uniforms: PyramidUniforms,
}

impl Plugin for PyramidMaterialPlugin {
    fn build(&self, app: &mut App) {
        load_internal_asset!(
            app,
            PYRAMID_SHADER,
            "pyramid.wgsl",
            Shader::from_wgsl
        );
        app.add_plugins(MaterialPlugin::<PyramidMaterial>::default());
    }
}

/// Convert a vector to bevy's math types
fn vec4(v: glam::Vec4) -> Vec4 {
    Vec4::from_array(v.to_array())
}

impl From<&Uniforms> for PyramidUniforms {
    fn from(u: &Uniforms) -> Self {
        PyramidUniforms {
            ambient: vec4(u.products.ambient),
            diffuse: vec4(u.products.diffuse),
            specular: vec4(u.products.specular),
            light: vec4(u.light),
            shininess: u.products.shininess,
            shading: u.shading_flag(),
            wireframe: u32::from(u.wireframe),
            lit: u32::from(u.lit),
        }
    }
}

impl PyramidMaterial {
    /// Create a new material
    pub fn new(uniforms: &Uniforms) -> Self {
        PyramidMaterial {
            uniforms: uniforms.into(),
        }
    }

    /// Update uniforms
    pub fn update(&mut self, uniforms: &Uniforms) {
        self.uniforms = uniforms.into();
    }
}

impl Material for PyramidMaterial {
    fn vertex_shader() -> ShaderRef {
        ShaderRef::Handle(PYRAMID_SHADER)
    }

    fn fragment_shader() -> ShaderRef {
        ShaderRef::Handle(PYRAMID_SHADER)
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayout,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_NORMAL.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        Ok(())
    }
}
