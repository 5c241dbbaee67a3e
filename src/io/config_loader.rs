use crate::io::render_settings::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `[files]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    pub obj: Option<String>,
    pub output: Option<String>,
    /// One-line render settings file to load before rendering
    pub settings: Option<String>,
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub width: u32,
    pub height: u32,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// `[camera]`; unset fields keep the scene camera's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub position: Option<[f32; 3]>,
    pub target: Option<[f32; 3]>,
    pub up: Option<[f32; 3]>,
    /// Vertical field of view in degrees
    pub fov: Option<f32>,
    pub near: Option<f32>,
    pub far: Option<f32>,
}

/// `[light]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSection {
    pub position: Option<[f32; 3]>,
    pub color: Option<[f32; 3]>,
}

/// `[object]`: applied to the loaded object as translate, then rotate, then scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSection {
    pub translate: Option<[f32; 3]>,
    /// Euler angles in degrees
    pub rotate: Option<[f32; 3]>,
    pub scale: Option<[f32; 3]>,
}

/// Scene description for the command-line renderer. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub files: FilesSection,
    pub output: OutputSection,
    pub render: RenderSettings,
    pub camera: CameraSection,
    pub light: LightSection,
    pub object: ObjectSection,
}

/// TOML reader/writer for `SceneConfig`.
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<SceneConfig, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
        Self::load_from_content(&content)
    }

    pub fn load_from_content(content: &str) -> Result<SceneConfig, String> {
        let config: SceneConfig =
            toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(config: &SceneConfig, path: P) -> Result<(), String> {
        let content = toml::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| format!("Failed to write config '{}': {}", path.as_ref().display(), e))
    }

    /// Writes an example config with the default camera and light spelled out.
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        let config = SceneConfig {
            files: FilesSection {
                obj: Some("models/cube.obj".to_string()),
                output: Some("render.png".to_string()),
                settings: None,
            },
            camera: CameraSection {
                position: Some([0.0, 0.0, 150.0]),
                target: Some([0.0, 0.0, 0.0]),
                up: Some([0.0, 1.0, 0.0]),
                fov: Some(10.0),
                near: Some(1.0),
                far: Some(10000.0),
            },
            light: LightSection {
                position: Some([0.0, 0.0, 200.0]),
                color: Some([100.0, 100.0, 100.0]),
            },
            ..Default::default()
        };
        Self::save_to_file(&config, path)
    }

    fn validate(config: &SceneConfig) -> Result<(), String> {
        if config.output.width == 0 || config.output.height == 0 {
            return Err("Output width and height must be greater than 0".to_string());
        }
        if let Some(scale) = config.object.scale {
            if scale.contains(&0.0) {
                return Err("Object scale factors must be non-zero".to_string());
            }
        }
        if let (Some(near), Some(far)) = (config.camera.near, config.camera.far) {
            if near <= 0.0 || far <= near {
                return Err(format!("Invalid clip planes: near {} far {}", near, far));
            }
        }
        Ok(())
    }
}
