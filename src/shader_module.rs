use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::utils;
use ash::vk;
use std::collections::HashMap;

pub fn shader_module_create_info(words: &[u32]) -> vk::ShaderModuleCreateInfo<'_> {
    // code_size is in bytes, code() takes care of it
    vk::ShaderModuleCreateInfo::default()
        .flags(vk::ShaderModuleCreateFlags::empty())
        .code(words)
}

pub fn create_shader_module(
    device: &ash::Device,
    words: &[u32],
) -> Result<vk::ShaderModule, BuildError> {
    let create_info = shader_module_create_info(words);
    // safety: device is a live logical device and words outlives the call
    let module = unsafe { device.create_shader_module(&create_info, None)? };
    Ok(module)
}

/// Compiled SPIR-V of a build, keyed by source file name.
#[derive(Debug, Default)]
pub struct ShaderLibrary {
    shaders: HashMap<String, Vec<u32>>,
}

impl ShaderLibrary {
    /// Reads the artifact of every entry in `config` from its output directory.
    pub fn load(config: &BuildConfig) -> Result<ShaderLibrary, BuildError> {
        let mut shaders = HashMap::with_capacity(config.shaders.len());
        for shader in &config.shaders {
            let path = shader.output_path(&config.output_dir);
            let words = utils::read_spirv_artifact(&path)?;
            log::debug!("loaded {} ({} words)", path.display(), words.len());
            shaders.insert(shader.name.clone(), words);
        }
        Ok(ShaderLibrary { shaders })
    }

    pub fn insert(&mut self, name: impl Into<String>, words: Vec<u32>) {
        self.shaders.insert(name.into(), words);
    }

    pub fn words(&self, name: &str) -> Result<&[u32], BuildError> {
        self.shaders
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| BuildError::UnknownShader(name.to_string()))
    }

    pub fn create_module(
        &self,
        device: &ash::Device,
        name: &str,
    ) -> Result<vk::ShaderModule, BuildError> {
        create_shader_module(device, self.words(name)?)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shaders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}
