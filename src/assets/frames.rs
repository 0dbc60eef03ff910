use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use image::{Rgba, RgbaImage};

use crate::foundation::core::ScreenSize;
use crate::foundation::error::{YanzhiError, YanzhiResult};

/// Name of the optional keyframe map inside a frame directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Sparse mapping from a 1-based logical step counter to the file name of the
/// frame shown at that step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyframeMap {
    by_counter: BTreeMap<u64, String>,
}

impl KeyframeMap {
    pub fn new(entries: impl IntoIterator<Item = (u64, String)>) -> Self {
        Self {
            by_counter: entries.into_iter().collect(),
        }
    }

    /// Counter `i` shows frame `i - 1` of a set named by [`flat_frames`].
    pub fn sequential(count: usize) -> Self {
        Self::new((1..=count as u64).map(|i| (i, format!("{:04}.png", i - 1))))
    }

    /// Parse `{"1": "0003.png", "2": "0003.png", ...}`.
    pub fn from_json(s: &str) -> YanzhiResult<Self> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(s).map_err(|e| YanzhiError::serde(e.to_string()))?;
        let mut by_counter = BTreeMap::new();
        for (k, v) in raw {
            let counter = k.trim().parse::<u64>().map_err(|_| {
                YanzhiError::resource(format!("keyframe counter '{k}' is not an integer"))
            })?;
            by_counter.insert(counter, v);
        }
        Ok(Self { by_counter })
    }

    pub fn get(&self, counter: u64) -> Option<&str> {
        self.by_counter.get(&counter).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_counter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_counter.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.by_counter.values().map(String::as_str)
    }
}

/// Ordered, immutable, non-empty sequence of decoded frames for one asset.
#[derive(Clone, Debug)]
pub struct FrameSet {
    name: String,
    frames: Vec<Arc<RgbaImage>>,
    index_by_file: HashMap<String, usize>,
    keyframes: Option<KeyframeMap>,
}

impl FrameSet {
    /// Build from `(file name, image)` pairs already in display order.
    pub fn new(
        name: impl Into<String>,
        frames: Vec<(String, RgbaImage)>,
        keyframes: Option<KeyframeMap>,
    ) -> YanzhiResult<Self> {
        let name = name.into();
        if frames.is_empty() {
            return Err(YanzhiError::resource(format!("no frames found in {name}")));
        }

        let mut index_by_file = HashMap::with_capacity(frames.len());
        let mut images = Vec::with_capacity(frames.len());
        for (i, (file, img)) in frames.into_iter().enumerate() {
            index_by_file.insert(file, i);
            images.push(Arc::new(img));
        }

        if let Some(map) = &keyframes {
            if let Some(missing) = map.targets().find(|t| !index_by_file.contains_key(*t)) {
                return Err(YanzhiError::resource(format!(
                    "{name}: keyframe map references unknown frame '{missing}'"
                )));
            }
        }

        Ok(Self {
            name,
            frames: images,
            index_by_file,
            keyframes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Arc<RgbaImage>] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Arc<RgbaImage>> {
        self.frames.get(index)
    }

    /// Pixel size of the first frame.
    pub fn frame_size(&self) -> ScreenSize {
        let (w, h) = self.frames[0].dimensions();
        ScreenSize::new(w, h)
    }

    pub fn index_of(&self, file: &str) -> Option<usize> {
        self.index_by_file.get(file).copied()
    }

    pub fn keyframes(&self) -> Option<&KeyframeMap> {
        self.keyframes.as_ref()
    }

    /// Frame index shown at keyframe step `counter`, if the map has one.
    pub fn keyframe_index(&self, counter: u64) -> Option<usize> {
        let file = self.keyframes.as_ref()?.get(counter)?;
        self.index_of(file)
    }
}

/// Resource loader consumed by the stage: resource name in, frames (or font
/// bytes) out.
pub trait FrameSource {
    fn load(&self, resource: &str) -> YanzhiResult<FrameSet>;

    fn load_font(&self, resource: &str) -> YanzhiResult<Vec<u8>>;
}

/// Loads `root/<resource>/` where every entry except [`METADATA_FILE`] is one
/// frame, in file-name order.
#[derive(Clone, Debug)]
pub struct DirFrameSource {
    root: PathBuf,
}

impl DirFrameSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for DirFrameSource {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, resource: &str) -> YanzhiResult<FrameSet> {
        let dir = self.root.join(resource);
        let entries = std::fs::read_dir(&dir).map_err(|e| {
            YanzhiError::resource(format!("read frame dir '{}': {e}", dir.display()))
        })?;

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push((name, path));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut keyframes = None;
        let mut frames = Vec::with_capacity(files.len());
        for (name, path) in files {
            if name == METADATA_FILE {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("read '{}'", path.display()))?;
                keyframes = Some(KeyframeMap::from_json(&json)?);
                continue;
            }
            let img = image::open(&path)
                .map_err(|e| YanzhiError::resource(format!("decode '{}': {e}", path.display())))?
                .to_rgba8();
            frames.push((name, img));
        }

        let set = FrameSet::new(resource, frames, keyframes)?;
        tracing::info!(resource, frames = set.len(), "frame set loaded");
        Ok(set)
    }

    fn load_font(&self, resource: &str) -> YanzhiResult<Vec<u8>> {
        let path = self.root.join(resource);
        std::fs::read(&path)
            .map_err(|e| YanzhiError::resource(format!("read font '{}': {e}", path.display())))
    }
}

/// In-memory frame source for tests and asset-less runs.
///
/// Registered sets are returned as-is; unknown names either fail like a
/// missing directory or, with placeholders enabled, get generated flat frames.
#[derive(Clone, Debug, Default)]
pub struct MemoryFrameSource {
    sets: HashMap<String, FrameSet>,
    fonts: HashMap<String, Vec<u8>>,
    placeholder: Option<(usize, ScreenSize)>,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate `count` frames of `size` for any resource not registered. The
    /// generated sets carry a keyframe map that walks every frame once.
    pub fn with_placeholders(count: usize, size: ScreenSize) -> Self {
        Self {
            placeholder: Some((count.max(1), size)),
            ..Self::default()
        }
    }

    pub fn with_font(mut self, resource: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.fonts.insert(resource.into(), bytes);
        self
    }

    pub fn insert(&mut self, set: FrameSet) {
        self.sets.insert(set.name().to_owned(), set);
    }

    /// Register a generated set of `count` flat frames named `0000.png`...
    pub fn insert_flat(
        &mut self,
        name: &str,
        count: usize,
        size: ScreenSize,
        keyframes: Option<KeyframeMap>,
    ) -> YanzhiResult<()> {
        let set = FrameSet::new(name, flat_frames(name, count, size), keyframes)?;
        self.insert(set);
        Ok(())
    }
}

impl FrameSource for MemoryFrameSource {
    fn load(&self, resource: &str) -> YanzhiResult<FrameSet> {
        if let Some(set) = self.sets.get(resource) {
            return Ok(set.clone());
        }
        match self.placeholder {
            Some((count, size)) => FrameSet::new(
                resource,
                flat_frames(resource, count, size),
                Some(KeyframeMap::sequential(count)),
            ),
            None => Err(YanzhiError::resource(format!("no frames found in {resource}"))),
        }
    }

    fn load_font(&self, resource: &str) -> YanzhiResult<Vec<u8>> {
        self.fonts
            .get(resource)
            .cloned()
            .ok_or_else(|| YanzhiError::resource(format!("no font registered as {resource}")))
    }
}

/// Distinct flat-colored frames; the hue walks with the frame index so a
/// cycling placeholder is visibly animated.
pub fn flat_frames(name: &str, count: usize, size: ScreenSize) -> Vec<(String, RgbaImage)> {
    let seed = crate::foundation::math::stable_hash64(0, name);
    (0..count)
        .map(|i| {
            let v = seed.wrapping_add((i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let px = Rgba([(v >> 16) as u8, (v >> 24) as u8, (v >> 32) as u8, 255]);
            let img = RgbaImage::from_pixel(size.width.max(1), size.height.max(1), px);
            (format!("{i:04}.png"), img)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frames.rs"]
mod tests;
