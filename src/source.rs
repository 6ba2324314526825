//! Pull-based frame sources.
//!
//! Camera capture and landmark detection happen outside this crate. A
//! [`FrameSource`] hands the pipeline one [`Frame`] per tick: a grayscale
//! image plus the eye contours of every detected face. [`TraceSource`]
//! replays a recorded YAML trace; [`MemorySource`] serves frames built in
//! code.

use crate::{
    config::FrameConfig,
    geometry::{EyeLandmarks, Point2D},
    landmarks::{FaceEyes, FaceLandmarks, FrameSample},
    Error, Result,
};
use log::{debug, info};
use ndarray::Array2;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// One tick of input
#[derive(Debug, Clone)]
pub struct Frame {
    /// Seconds on a monotonic clock
    pub timestamp: f64,
    /// Grayscale image indexed `[row, col]`
    pub gray: Array2<u8>,
    /// Eyes of each detected face; empty when no face was found
    pub faces: Vec<FaceEyes>,
}

impl Frame {
    /// Borrow the frame as per-face samples for [`crate::tracker::EyeTracker::step`]
    #[must_use]
    pub fn samples(&self) -> Vec<FrameSample<'_>> {
        self.faces
            .iter()
            .map(|eyes| FrameSample::new(*eyes, self.timestamp, self.gray.view()))
            .collect()
    }
}

/// Source of frames, polled once per tick
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Frames held in memory
#[derive(Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<Frame>,
}

impl MemorySource {
    /// Serve the given frames in order
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames: frames.into() }
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

/// On-disk trace layout
#[derive(Debug, Deserialize)]
struct TraceFile {
    #[serde(default)]
    frames: Vec<TraceFrame>,
}

#[derive(Debug, Deserialize)]
struct TraceFrame {
    timestamp: f64,
    /// Grayscale image file, relative to the trace file
    #[serde(default)]
    image: Option<PathBuf>,
    /// Inline grayscale rows
    #[serde(default)]
    gray: Option<Vec<Vec<u8>>>,
    #[serde(default)]
    faces: Vec<TraceFace>,
}

#[derive(Debug, Deserialize)]
struct TraceFace {
    /// Full 68-point landmark set
    #[serde(default)]
    landmarks: Option<Vec<(f64, f64)>>,
    #[serde(default)]
    left_eye: Option<Vec<(f64, f64)>>,
    #[serde(default)]
    right_eye: Option<Vec<(f64, f64)>>,
}

/// Replays a YAML landmark trace
#[derive(Debug)]
pub struct TraceSource {
    base_dir: PathBuf,
    frames: VecDeque<TraceFrame>,
    frame_config: FrameConfig,
    index: usize,
}

impl TraceSource {
    /// Load a trace file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// timestamps go backwards.
    pub fn from_file<P: AsRef<Path>>(path: P, frame_config: FrameConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading landmark trace from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_yaml(&content, base_dir, frame_config)
    }

    /// Parse a trace from YAML text; image paths resolve against `base_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or timestamps go backwards.
    pub fn from_yaml(content: &str, base_dir: PathBuf, frame_config: FrameConfig) -> Result<Self> {
        let trace: TraceFile = serde_yaml::from_str(content)?;

        if let Some(pair) = trace
            .frames
            .windows(2)
            .find(|w| !(w[1].timestamp >= w[0].timestamp))
        {
            return Err(Error::TraceError(format!(
                "Timestamps must be non-decreasing: {} follows {}",
                pair[1].timestamp, pair[0].timestamp
            )));
        }

        info!("Trace holds {} frames", trace.frames.len());
        Ok(Self {
            base_dir,
            frames: trace.frames.into(),
            frame_config,
            index: 0,
        })
    }

    /// Frames not yet served
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn load_gray(&self, frame: &TraceFrame) -> Result<Array2<u8>> {
        if let Some(rows) = &frame.gray {
            return gray_from_rows(rows);
        }

        if let Some(image_path) = &frame.image {
            let path = self.base_dir.join(image_path);
            debug!("Loading frame image {}", path.display());
            let luma = image::open(&path)?.to_luma8();
            let (width, height) = luma.dimensions();
            return Array2::from_shape_vec((height as usize, width as usize), luma.into_raw())
                .map_err(|e| Error::TraceError(format!("Bad image buffer for {}: {e}", path.display())));
        }

        Ok(Array2::zeros((self.frame_config.height, self.frame_config.width)))
    }

    fn convert_face(&self, face: &TraceFace) -> Result<FaceEyes> {
        match (&face.landmarks, &face.left_eye, &face.right_eye) {
            (Some(landmarks), _, _) => FaceLandmarks::new(to_points(landmarks))?.eyes(),
            (None, Some(left), Some(right)) => Ok(FaceEyes {
                left: EyeLandmarks::try_from(to_points(left).as_slice())?,
                right: EyeLandmarks::try_from(to_points(right).as_slice())?,
            }),
            _ => Err(Error::TraceError(format!(
                "Frame {}: a face needs `landmarks` or both `left_eye` and `right_eye`",
                self.index
            ))),
        }
    }
}

impl FrameSource for TraceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(raw) = self.frames.pop_front() else {
            return Ok(None);
        };

        let gray = self.load_gray(&raw)?;
        let faces = raw
            .faces
            .iter()
            .map(|face| self.convert_face(face))
            .collect::<Result<Vec<_>>>()?;
        self.index += 1;

        Ok(Some(Frame {
            timestamp: raw.timestamp,
            gray,
            faces,
        }))
    }
}

fn to_points(raw: &[(f64, f64)]) -> Vec<Point2D> {
    raw.iter().copied().map(Point2D::from).collect()
}

/// Build a grayscale image from equally long rows
fn gray_from_rows(rows: &[Vec<u8>]) -> Result<Array2<u8>> {
    let width = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != width) {
        return Err(Error::TraceError("Inline gray rows differ in length".to_string()));
    }

    let data: Vec<u8> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), data)
        .map_err(|e| Error::TraceError(format!("Bad inline image: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = r#"
frames:
  - timestamp: 0.0
    gray: [[0, 80], [200, 10]]
    faces:
      - left_eye: [[10, 5], [11, 4], [13, 4], [14, 5], [13, 6], [11, 6]]
        right_eye: [[0, 5], [1, 4], [3, 4], [4, 5], [3, 6], [1, 6]]
  - timestamp: 0.033
"#;

    #[test]
    fn test_parse_trace() {
        let mut source = TraceSource::from_yaml(TRACE, PathBuf::new(), FrameConfig::default()).unwrap();
        assert_eq!(source.remaining(), 2);

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.gray.dim(), (2, 2));
        assert_eq!(first.gray[[1, 0]], 200);
        assert_eq!(first.faces.len(), 1);
        assert_eq!(first.faces[0].left.points()[0], Point2D::new(10.0, 5.0));
        assert_eq!(first.samples().len(), 1);

        let second = source.next_frame().unwrap().unwrap();
        assert!(second.faces.is_empty());
        assert_eq!(second.gray.dim(), (480, 640));

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_rejects_backwards_timestamps() {
        let trace = "frames:\n  - timestamp: 1.0\n  - timestamp: 0.5\n";
        let err = TraceSource::from_yaml(trace, PathBuf::new(), FrameConfig::default()).unwrap_err();
        assert!(matches!(err, Error::TraceError(_)));
    }

    #[test]
    fn test_face_without_eyes_is_error() {
        let trace = "frames:\n  - timestamp: 1.0\n    faces:\n      - left_eye: [[0, 0], [1, 1], [2, 1], [3, 0], [2, 0], [1, 0]]\n";
        let mut source = TraceSource::from_yaml(trace, PathBuf::new(), FrameConfig::default()).unwrap();
        assert!(source.next_frame().is_err());
    }

    #[test]
    fn test_ragged_rows() {
        assert!(gray_from_rows(&[vec![1, 2], vec![3]]).is_err());
        assert_eq!(gray_from_rows(&[]).unwrap().dim(), (0, 0));
    }

    #[test]
    fn test_memory_source() {
        let frame = Frame {
            timestamp: 1.0,
            gray: Array2::zeros((4, 4)),
            faces: Vec::new(),
        };
        let mut source = MemorySource::new(vec![frame]);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }
}
