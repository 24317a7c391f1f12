//! Shader binding constants.
//!
//! Binding numbers shared between Rust code and the WGSL shaders. Keep these
//! in sync with `shaders/background.wgsl` and `shaders/label.wgsl`.

/// Binding constants for the background image pipeline.
pub mod background {
    /// Group 0: Uniforms
    pub const UNIFORM_GROUP: u32 = 0;
    /// Binding 0 in group 0: Transform matrix uniform
    pub const UNIFORM_TRANSFORM_BINDING: u32 = 0;

    /// Group 1: Texture resources
    pub const TEXTURE_GROUP: u32 = 1;
    /// Binding 0 in group 1: Texture 2D
    pub const TEXTURE_BINDING: u32 = 0;
    /// Binding 1 in group 1: Sampler
    pub const SAMPLER_BINDING: u32 = 1;
}

/// Binding constants for the label cylinder pipeline.
pub mod label {
    /// Group 0: Uniforms
    pub const UNIFORM_GROUP: u32 = 0;
    /// Binding 0 in group 0: camera, model and ambient light
    pub const UNIFORM_LABEL_BINDING: u32 = 0;

    /// Group 1: Label texture
    pub const TEXTURE_GROUP: u32 = 1;
    /// Binding 0 in group 1: Texture 2D
    pub const TEXTURE_BINDING: u32 = 0;
    /// Binding 1 in group 1: Sampler
    pub const SAMPLER_BINDING: u32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_bindings_are_sequential() {
        assert_eq!(background::UNIFORM_GROUP, 0);
        assert_eq!(background::UNIFORM_TRANSFORM_BINDING, 0);
        assert_eq!(background::TEXTURE_GROUP, 1);
        assert_eq!(background::TEXTURE_BINDING, 0);
        assert_eq!(background::SAMPLER_BINDING, 1);
    }

    #[test]
    fn test_label_bindings_share_texture_layout() {
        assert_eq!(label::UNIFORM_GROUP, 0);
        assert_eq!(label::UNIFORM_LABEL_BINDING, 0);
        assert_eq!(label::TEXTURE_GROUP, background::TEXTURE_GROUP);
        assert_eq!(label::TEXTURE_BINDING, background::TEXTURE_BINDING);
        assert_eq!(label::SAMPLER_BINDING, background::SAMPLER_BINDING);
    }
}
