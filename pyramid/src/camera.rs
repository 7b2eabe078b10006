// camera.rs    Camera and lighting module
//
// Copyright (c) 2024  Douglas Lau
//
use glam::{Mat4, Vec3, Vec4};

/// Perspective camera looking down the negative Z axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view (degrees)
    fov: f32,

    /// Aspect ratio (width / height)
    aspect: f32,

    /// Eye position
    eye: Vec3,
}

/// Light source and material colors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Light ambient color
    pub light_ambient: Vec4,

    /// Light diffuse color
    pub light_diffuse: Vec4,

    /// Light specular color
    pub light_specular: Vec4,

    /// Material ambient color
    pub ambient: Vec4,

    /// Material diffuse color
    pub diffuse: Vec4,

    /// Material specular color
    pub specular: Vec4,

    /// Material shininess exponent
    pub shininess: f32,
}

/// Light colors multiplied by material colors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Products {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Camera {
    /// Near clipping plane
    pub const NEAR: f32 = 0.1;

    /// Far clipping plane
    pub const FAR: f32 = 100.0;

    /// Half extent of the scene kept in view
    pub const EXTENT: f32 = 12.0;

    /// Create a camera framing the scene
    ///
    /// The eye distance keeps [EXTENT] in view along the narrower axis.
    ///
    /// [extent]: Camera::EXTENT
    pub fn new(fov: f32, aspect: f32) -> Self {
        let half_fov = (fov / 2.0).to_radians();
        let mut dist = Self::EXTENT / half_fov.tan();
        if aspect <= 1.0 {
            dist /= aspect;
        }
        let eye = Vec3::new(0.0, 0.0, dist);
        Camera { fov, aspect, eye }
    }

    /// Get the vertical field of view (degrees)
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Get the aspect ratio
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Get the eye position
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Get the view matrix
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
    }

    /// Get the projection matrix (OpenGL clip space)
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.aspect,
            Self::NEAR,
            Self::FAR,
        )
    }

    /// Get the light position in world space
    ///
    /// The light sits between the eye and the scene, at 80% of the eye
    /// distance.
    pub fn light_position(&self) -> Vec4 {
        (self.eye * 0.2).extend(1.0)
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            light_ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            light_diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
            light_specular: Vec4::new(0.8, 0.8, 0.8, 1.0),
            ambient: Vec4::new(1.0, 0.0, 1.0, 1.0),
            diffuse: Vec4::new(1.0, 0.8, 0.0, 1.0),
            specular: Vec4::new(0.5, 0.5, 0.5, 1.0),
            shininess: 5.0,
        }
    }
}

impl Lighting {
    /// Calculate light / material products
    pub fn products(&self) -> Products {
        Products {
            ambient: self.light_ambient * self.ambient,
            diffuse: self.light_diffuse * self.diffuse,
            specular: self.light_specular * self.specular,
            shininess: self.shininess,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn eye_distance() {
        let wide = Camera::new(30.0, 2.0);
        let dist = 12.0 / 15f32.to_radians().tan();
        assert!((wide.eye().z - dist).abs() < 1e-4);
        let tall = Camera::new(30.0, 0.5);
        assert!((tall.eye().z - dist * 2.0).abs() < 1e-3);
    }

    #[test]
    fn light_in_front_of_eye() {
        let cam = Camera::new(30.0, 1.5);
        let light = cam.light_position();
        assert_eq!(light.w, 1.0);
        assert!((light.z - cam.eye().z * 0.2).abs() < 1e-4);
        assert!(light.z > 0.0 && light.z < cam.eye().z);
    }

    #[test]
    fn view_projection() {
        let cam = Camera::new(30.0, 1.0);
        // origin is straight ahead of the eye
        let clip = cam.projection() * cam.view() * Vec4::W;
        assert!(clip.x.abs() < 1e-4);
        assert!(clip.y.abs() < 1e-4);
        assert!(clip.w > 0.0);
        let ndc_z = clip.z / clip.w;
        assert!(ndc_z > -1.0 && ndc_z < 1.0);
    }

    #[test]
    fn material_products() {
        let p = Lighting::default().products();
        assert_eq!(p.ambient, Vec4::new(0.2, 0.0, 0.2, 1.0));
        assert_eq!(p.diffuse, Vec4::new(1.0, 0.8, 0.0, 1.0));
        assert_eq!(p.shininess, 5.0);
    }
}
