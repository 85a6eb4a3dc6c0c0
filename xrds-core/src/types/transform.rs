/// Scene-graph placement of an object: a [`crate::Pose`] plus a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    translation: glam::Vec3,
    scale: glam::Vec3,
    rotation: glam::Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: glam::Vec3::ZERO,
            scale: glam::Vec3::ONE,
            rotation: glam::Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn with_translation(mut self, translation: glam::Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: glam::Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: glam::Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn get_translation(&self) -> glam::Vec3 {
        self.translation
    }

    pub fn get_rotation(&self) -> glam::Quat {
        self.rotation
    }

    pub fn get_scale(&self) -> glam::Vec3 {
        self.scale
    }
}
