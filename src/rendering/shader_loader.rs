use std::{
    path::{Path, PathBuf},
    sync::{
        mpsc::{self, channel},
        Arc, RwLock,
    },
    time::Duration,
};

use anyhow::{anyhow, Context};
use id_arena::{Arena, Id};
use naga::{
    back::wgsl::WriterFlags,
    valid::{Capabilities, ValidationFlags},
};
use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
};
use notify_debouncer_mini::{
    new_debouncer_opt, notify::*, DebounceEventResult, DebouncedEventKind, Debouncer,
};
use pollster::block_on;
use wgpu::{PollType, RenderPipeline};

use crate::rendering::config::RenderConfig;

type PipelineFactory = Box<
    dyn Sync
        + Send
        + Fn(&wgpu::Device, &ShaderDefinition, &str) -> anyhow::Result<wgpu::RenderPipeline>,
>;

#[derive(Debug, Clone)]
pub struct ShaderDefinition {
    pub name: &'static str,
    /// Relative to the configured shader folder
    pub path: &'static str,
}

pub struct ShaderEntry {
    pipeline_id: PipelineId,
    def: ShaderDefinition,
    factory: PipelineFactory,
}

impl ShaderEntry {
    pub fn new(pipeline_id: PipelineId, def: ShaderDefinition, factory: PipelineFactory) -> Self {
        Self {
            pipeline_id,
            def,
            factory,
        }
    }
}

pub type PipelineId = Id<PipelineCacheEntry>;

#[derive(Default)]
pub struct PipelineCacheEntry(Option<wgpu::RenderPipeline>);

impl PipelineCacheEntry {
    pub fn set_pipeline(&mut self, pipeline: wgpu::RenderPipeline) {
        self.0 = Some(pipeline);
    }
}

pub struct PipelineCacheBuilder {
    shaders: Arena<ShaderEntry>,
    pipelines: Arena<PipelineCacheEntry>,
}

impl PipelineCacheBuilder {
    pub fn new() -> Self {
        Self {
            shaders: Arena::new(),
            pipelines: Arena::new(),
        }
    }

    /// Several pipelines may share one shader file; all of them are rebuilt
    /// when it changes.
    pub fn add_shader(
        &mut self,
        shader_def: ShaderDefinition,
        factory: PipelineFactory,
    ) -> PipelineId {
        let pipeline_id = self.pipelines.alloc(PipelineCacheEntry::default());
        let shader_entry = ShaderEntry::new(pipeline_id, shader_def, factory);
        self.shaders.alloc(shader_entry);
        pipeline_id
    }

    pub fn build(self) -> PipelineCache {
        PipelineCache {
            shaders: Arc::new(self.shaders),
            pipelines: self.pipelines,
        }
    }
}

pub struct PipelineCache {
    shaders: Arc<Arena<ShaderEntry>>,
    pipelines: Arena<PipelineCacheEntry>,
}

impl PipelineCache {
    pub fn get(&self, id: PipelineId) -> Option<&RenderPipeline> {
        self.pipelines.get(id).and_then(|entry| entry.0.as_ref())
    }

    pub fn get_entry_mut(&mut self, id: PipelineId) -> Option<&mut PipelineCacheEntry> {
        self.pipelines.get_mut(id)
    }

    pub fn iter_shaders_and_pipelines_mut(
        &mut self,
    ) -> impl Iterator<Item = (&ShaderEntry, &mut PipelineCacheEntry)> {
        // Shaders and pipelines are allocated in lockstep by `add_shader`
        self.shaders
            .iter()
            .map(|(_, shader_entry)| shader_entry)
            .zip(
                self.pipelines
                    .iter_mut()
                    .map(|(_, pipeline_entry)| pipeline_entry),
            )
    }
}

struct ShaderFolders {
    root: PathBuf,
    shared: PathBuf,
}

type CompiledPipeline = (&'static str, PipelineId, wgpu::RenderPipeline);

/// Compiles shaders into pipelines. With hot reloading enabled, a watcher
/// thread recompiles changed files and hands the results back over a channel.
pub struct ShaderLoader {
    pub cache: PipelineCache,
    device: wgpu::Device,
    folders: Arc<ShaderFolders>,
    receiver: mpsc::Receiver<CompiledPipeline>,
    composer: Arc<RwLock<Composer>>,
    _debouncer: Option<Debouncer<RecommendedWatcher>>,
}

impl ShaderLoader {
    pub fn new(
        device: wgpu::Device,
        cache_builder: PipelineCacheBuilder,
        config: &RenderConfig,
    ) -> anyhow::Result<Self> {
        let cache = cache_builder.build();
        let folders = Arc::new(ShaderFolders {
            root: config.shader_folder.clone(),
            shared: config.shared_shader_folder(),
        });

        let composer = create_composer(&folders.shared)
            .context("Failed to create composer for shader loader")?;
        let composer = Arc::new(RwLock::new(composer));

        let (send_new_pipelines, recv_new_pipelines) = channel();

        let debouncer = if config.hot_reload_shaders {
            let debouncer = watch_shaders(
                device.clone(),
                folders.clone(),
                cache.shaders.clone(),
                composer.clone(),
                send_new_pipelines,
            )?;
            log::info!("Watching {} for shader changes", folders.root.display());
            Some(debouncer)
        } else {
            None
        };

        let mut shader_loader = Self {
            device,
            cache,
            folders,
            receiver: recv_new_pipelines,
            composer,
            _debouncer: debouncer,
        };

        shader_loader
            .create_all_pipelines()
            .context("Failed to create all pipelines")?;

        Ok(shader_loader)
    }

    pub fn create_all_pipelines(&mut self) -> anyhow::Result<()> {
        for (shader, pipeline_entry) in self.cache.iter_shaders_and_pipelines_mut() {
            let pipeline = compile_file(
                &self.device,
                &self.folders.root,
                &shader.def,
                &shader.factory,
                &self.composer,
            )
            .with_context(|| format!("Failed to compile shader: {}", shader.def.name))?;
            pipeline_entry.set_pipeline(pipeline);
        }

        Ok(())
    }

    /// Swaps in pipelines rebuilt by the watcher since the last call.
    pub fn load_pending_shaders(&mut self) -> anyhow::Result<()> {
        while let Ok((name, pipeline_id, pipeline)) = self.receiver.try_recv() {
            let entry = self
                .cache
                .get_entry_mut(pipeline_id)
                .ok_or_else(|| anyhow!("Reloaded shader {name} has no pipeline slot"))?;
            log::info!("Shader reloaded: {}", name);
            entry.set_pipeline(pipeline);
        }

        Ok(())
    }
}

fn watch_shaders(
    device: wgpu::Device,
    folders: Arc<ShaderFolders>,
    shaders: Arc<Arena<ShaderEntry>>,
    composer: Arc<RwLock<Composer>>,
    sender: mpsc::Sender<CompiledPipeline>,
) -> anyhow::Result<Debouncer<RecommendedWatcher>> {
    let watched_folders = folders.clone();

    let mut debouncer = new_debouncer_opt(
        notify_debouncer_mini::Config::default().with_timeout(Duration::from_millis(100)),
        move |res: DebounceEventResult| {
            let events = match res {
                Ok(events) => events,
                Err(e) => {
                    log::error!("Error debouncing shader changes: {}", e);
                    return;
                }
            };

            for event in events {
                if event.kind != DebouncedEventKind::Any {
                    continue;
                }

                // A shared module can be imported anywhere, so rebuild everything
                let shared_changed = event
                    .path
                    .parent()
                    .zip(folders.shared.canonicalize().ok())
                    .is_some_and(|(parent, shared)| parent == shared);

                if shared_changed {
                    match create_composer(&folders.shared) {
                        Ok(new_composer) => match composer.write() {
                            Ok(mut composer) => *composer = new_composer,
                            Err(_) => log::error!("Shader composer lock is poisoned"),
                        },
                        Err(e) => {
                            log::error!("Failed to reload shared shader modules: {:?}", e);
                            continue;
                        }
                    }
                }

                let affected = shaders.iter().map(|(_, entry)| entry).filter(|entry| {
                    shared_changed || event.path.ends_with(entry.def.path)
                });

                for entry in affected {
                    match compile_file(
                        &device,
                        &folders.root,
                        &entry.def,
                        &entry.factory,
                        &composer,
                    ) {
                        Ok(pipeline) => {
                            if sender
                                .send((entry.def.name, entry.pipeline_id, pipeline))
                                .is_err()
                            {
                                log::warn!("Shader loader is gone, dropping {}", entry.def.name);
                            }
                        }
                        Err(e) => log::error!("Failed to load shader: {:?}", e),
                    }
                }
            }
        },
    )
    .context("Failed to create shader watcher")?;

    let absolute_shader_folder = watched_folders
        .root
        .canonicalize()
        .with_context(|| format!("Shader folder {} not found", watched_folders.root.display()))?;

    debouncer
        .watcher()
        .watch(&absolute_shader_folder, RecursiveMode::Recursive)
        .context("Failed to watch shader folder")?;

    Ok(debouncer)
}

fn compile_file(
    device: &wgpu::Device,
    shader_folder: &Path,
    shader_def: &ShaderDefinition,
    factory: &PipelineFactory,
    composer: &RwLock<Composer>,
) -> anyhow::Result<wgpu::RenderPipeline> {
    let path = shader_folder.join(shader_def.path);
    let shader_code = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read shader file {}", path.display()))?;

    let file_path = path.to_string_lossy().to_string();

    let module = {
        let mut composer = composer
            .write()
            .map_err(|_| anyhow!("Shader composer lock is poisoned"))?;

        composer
            .make_naga_module(NagaModuleDescriptor {
                file_path: &file_path,
                source: &shader_code,
                ..Default::default()
            })
            .context("Failed to create Naga module from shader code")?
    };

    // wgpu validates again internally, this pass only feeds the WGSL writer
    let validation_flags = ValidationFlags::empty();
    let info = naga::valid::Validator::new(validation_flags, Capabilities::all())
        .validate(&module)
        .context("Failed to validate Naga module")?;

    let shader_code = naga::back::wgsl::write_string(&module, &info, WriterFlags::empty())
        .context("Failed to convert Naga module to WGSL string")?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline = factory(device, shader_def, &shader_code);

    device
        .poll(PollType::Wait)
        .context("Failed to poll device after shader compilation")?;

    let error = block_on(device.pop_error_scope());

    if let Some(error) = error {
        return Err(anyhow!(
            "Shader compilation failed for {}: {}",
            shader_def.name,
            error
        ));
    };

    pipeline
}

fn create_composer(shared_folder: &Path) -> anyhow::Result<Composer> {
    let shared_files = std::fs::read_dir(shared_folder).with_context(|| {
        format!(
            "Failed to read shared shader modules directory {}",
            shared_folder.display()
        )
    })?;

    let mut composer = Composer::default();

    for entry in shared_files {
        let path = entry
            .context("Failed to read entry in shared shader modules directory")?
            .path();

        if !path.is_file() || path.extension().is_none_or(|ext| ext != "wgsl") {
            continue;
        }

        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read shared shader module {}", path.display()))?;

        let file_path = path.to_string_lossy().to_string();

        composer
            .add_composable_module(ComposableModuleDescriptor {
                source: &source,
                file_path: &file_path,
                language: ShaderLanguage::Wgsl,
                ..Default::default()
            })
            .with_context(|| format!("Failed to add shared shader module: {}", file_path))?;

        log::debug!("Added shared shader module {}", file_path);
    }

    Ok(composer)
}
