use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Vertex marker shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexShape {
    #[default]
    Circle,
    Square,
}

/// Per-frame drawing options. The renderer copies one value at the start of
/// each frame, so a frame never sees a half-applied change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    // ===== vertex markers =====
    pub render_dot: bool,
    pub vertex_color: [u8; 3],
    /// Marker radius in pixels; zero or less draws nothing
    pub vertex_size: i32,
    pub vertex_shape: VertexShape,

    // ===== wireframe =====
    pub render_line: bool,
    pub line_color: [u8; 3],
    pub line_dashed: bool,

    // ===== faces =====
    pub render_face: bool,
    pub texture: bool,

    pub background_color: [u8; 3],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            render_dot: true,
            vertex_color: [0, 0, 211],
            vertex_size: 5,
            vertex_shape: VertexShape::Circle,
            render_line: true,
            line_color: [0, 211, 0],
            line_dashed: true,
            render_face: true,
            texture: true,
            background_color: [255, 255, 255],
        }
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl RenderSettings {
    /// One-line persisted form:
    /// `renderDot r g b size renderLine r g b renderFace texture`, booleans as 0/1.
    pub fn to_line(&self) -> String {
        let [vr, vg, vb] = self.vertex_color;
        let [lr, lg, lb] = self.line_color;
        format!(
            "{} {} {} {} {} {} {} {} {} {} {}",
            flag(self.render_dot),
            vr,
            vg,
            vb,
            self.vertex_size,
            flag(self.render_line),
            lr,
            lg,
            lb,
            flag(self.render_face),
            flag(self.texture)
        )
    }

    /// Parses the persisted line into a copy of `self`; fields not stored in
    /// the line (shape, dash, background) keep their current values.
    pub fn parse_line(&self, line: &str) -> Result<RenderSettings, String> {
        let mut tokens = line.split_whitespace();
        let mut next = |name: &str| {
            tokens
                .next()
                .ok_or_else(|| format!("Settings line ends before '{}'", name))
        };

        let mut parsed = self.clone();
        parsed.render_dot = parse_flag(next("renderDot")?, "renderDot")?;
        parsed.vertex_color = [
            parse_channel(next("vertexColor.r")?, "vertexColor.r")?,
            parse_channel(next("vertexColor.g")?, "vertexColor.g")?,
            parse_channel(next("vertexColor.b")?, "vertexColor.b")?,
        ];
        let size = next("vertexSize")?;
        parsed.vertex_size = size
            .parse()
            .map_err(|e| format!("Invalid vertexSize '{}': {}", size, e))?;
        parsed.render_line = parse_flag(next("renderLine")?, "renderLine")?;
        parsed.line_color = [
            parse_channel(next("lineColor.r")?, "lineColor.r")?,
            parse_channel(next("lineColor.g")?, "lineColor.g")?,
            parse_channel(next("lineColor.b")?, "lineColor.b")?,
        ];
        parsed.render_face = parse_flag(next("renderFace")?, "renderFace")?;
        parsed.texture = parse_flag(next("texture")?, "texture")?;
        Ok(parsed)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        std::fs::write(path, format!("{}\n", self.to_line()))
            .map_err(|e| format!("Failed to write settings '{}': {}", path.display(), e))?;
        info!("Saved render settings to '{}'", path.display());
        Ok(())
    }

    /// Replaces `self` with the persisted settings only if the whole line parses.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings '{}': {}", path.display(), e))?;
        let line = content.lines().next().unwrap_or_default();
        *self = self
            .parse_line(line)
            .map_err(|e| format!("Bad settings file '{}': {}", path.display(), e))?;
        info!("Loaded render settings from '{}'", path.display());
        Ok(())
    }
}

fn parse_flag(token: &str, name: &str) -> Result<bool, String> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(format!("Invalid {} '{}': expected 0 or 1", name, other)),
    }
}

fn parse_channel(token: &str, name: &str) -> Result<u8, String> {
    token
        .parse::<u8>()
        .map_err(|e| format!("Invalid {} '{}': {}", name, token, e))
}
