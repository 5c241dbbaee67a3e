use crate::io::config_loader::SceneConfig;
use crate::io::render_settings::VertexShape;
use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeArg {
    Circle,
    Square,
}

impl From<ShapeArg> for VertexShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Circle => VertexShape::Circle,
            ShapeArg::Square => VertexShape::Square,
        }
    }
}

/// Renders an OBJ model to a PNG on the CPU.
///
/// Command-line values override the TOML config given with `--config`.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // ===== files =====
    /// TOML scene config
    #[arg(long)]
    pub config: Option<String>,

    /// Write an example TOML config to this path and exit
    #[arg(long)]
    pub example_config: Option<String>,

    /// Input OBJ file
    #[arg(long)]
    pub obj: Option<String>,

    /// Output PNG path
    #[arg(short, long)]
    pub output: Option<String>,

    /// One-line render settings file to load
    #[arg(long)]
    pub settings: Option<String>,

    /// Save the effective render settings to this file after rendering
    #[arg(long)]
    pub save_settings: Option<String>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    // ===== overlays and faces =====
    /// Skip filled faces
    #[arg(long, default_value_t = false)]
    pub no_face: bool,

    /// Ignore material textures
    #[arg(long, default_value_t = false)]
    pub no_texture: bool,

    /// Skip the wireframe overlay
    #[arg(long, default_value_t = false)]
    pub no_lines: bool,

    /// Skip the vertex markers
    #[arg(long, default_value_t = false)]
    pub no_points: bool,

    /// Draw wireframe edges solid instead of dashed
    #[arg(long, default_value_t = false)]
    pub solid_lines: bool,

    /// Vertex marker radius in pixels
    #[arg(long)]
    pub vertex_size: Option<i32>,

    #[arg(long, value_enum)]
    pub vertex_shape: Option<ShapeArg>,

    // ===== camera =====
    /// Camera position, "x,y,z"
    #[arg(long, allow_negative_numbers = true)]
    pub camera_from: Option<String>,

    /// Camera target, "x,y,z"
    #[arg(long, allow_negative_numbers = true)]
    pub camera_at: Option<String>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    // ===== object =====
    /// Object translation, "x,y,z"
    #[arg(long, allow_negative_numbers = true)]
    pub translate: Option<String>,

    /// Object rotation in degrees, "x,y,z"
    #[arg(long, allow_negative_numbers = true)]
    pub rotate: Option<String>,

    /// Object scale, "x,y,z"
    #[arg(long, allow_negative_numbers = true)]
    pub scale: Option<String>,
}

/// Parses "x,y,z".
pub fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("Expected 3 comma-separated values, got '{}'", s));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|e| format!("Invalid number '{}': {}", part, e))?;
    }
    Ok(out)
}

impl Args {
    /// Overlays the command-line values on `config`.
    pub fn apply_to(&self, config: &mut SceneConfig) -> Result<(), String> {
        if let Some(obj) = &self.obj {
            config.files.obj = Some(obj.clone());
        }
        if let Some(output) = &self.output {
            config.files.output = Some(output.clone());
        }
        if let Some(settings) = &self.settings {
            config.files.settings = Some(settings.clone());
        }
        if let Some(width) = self.width {
            config.output.width = width;
        }
        if let Some(height) = self.height {
            config.output.height = height;
        }

        let render = &mut config.render;
        if self.no_face {
            render.render_face = false;
        }
        if self.no_texture {
            render.texture = false;
        }
        if self.no_lines {
            render.render_line = false;
        }
        if self.no_points {
            render.render_dot = false;
        }
        if self.solid_lines {
            render.line_dashed = false;
        }
        if let Some(size) = self.vertex_size {
            render.vertex_size = size;
        }
        if let Some(shape) = self.vertex_shape {
            render.vertex_shape = shape.into();
        }

        if let Some(from) = &self.camera_from {
            config.camera.position = Some(parse_vec3(from)?);
        }
        if let Some(at) = &self.camera_at {
            config.camera.target = Some(parse_vec3(at)?);
        }
        if let Some(fov) = self.fov {
            config.camera.fov = Some(fov);
        }

        if let Some(translate) = &self.translate {
            config.object.translate = Some(parse_vec3(translate)?);
        }
        if let Some(rotate) = &self.rotate {
            config.object.rotate = Some(parse_vec3(rotate)?);
        }
        if let Some(scale) = &self.scale {
            let scale = parse_vec3(scale)?;
            if scale.contains(&0.0) {
                return Err("Scale factors must be non-zero".to_string());
            }
            config.object.scale = Some(scale);
        }

        if config.output.width == 0 || config.output.height == 0 {
            return Err("Output width and height must be greater than 0".to_string());
        }
        Ok(())
    }
}
