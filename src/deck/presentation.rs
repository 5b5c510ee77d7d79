//! In-memory slide deck persisted as JSON

use crate::core::error::{DeckError, Result};
use crate::core::types::{ChartType, Inches, LayoutIndex, SlideIndex, LAYOUT_CONTENT};
use crate::deck::layout::{layout_at, Layout};
use crate::deck::{
    with_deck_extension, BackgroundFill, ChartData, SlideDeck, TextStyle, TextUpdate,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CHART_POSITION: Inches = Inches::new(1.0, 2.0);
const DEFAULT_CHART_SIZE: Inches = Inches::new(8.0, 5.0);
const DEFAULT_PICTURE_POSITION: Inches = Inches::new(1.0, 1.0);

const DEFAULT_MAX_SLIDES: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartShape {
    pub chart_type: ChartType,
    pub data: ChartData,
    pub position: Inches,
    pub size: Inches,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub path: PathBuf,
    pub position: Inches,
    /// `None` keeps the image's native size
    pub size: Option<Inches>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub layout: LayoutIndex,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub title_style: TextStyle,
    #[serde(default)]
    pub body_style: TextStyle,
    #[serde(default)]
    pub background: BackgroundFill,
    #[serde(default)]
    pub charts: Vec<ChartShape>,
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

impl Slide {
    fn new(layout: LayoutIndex) -> Self {
        Self {
            layout,
            title: None,
            body: None,
            title_style: TextStyle::default(),
            body_style: TextStyle::default(),
            background: BackgroundFill::default(),
            charts: Vec::new(),
            pictures: Vec::new(),
        }
    }

    fn layout_info(&self) -> &'static Layout {
        layout_at(self.layout).unwrap_or(&crate::deck::LAYOUTS[LAYOUT_CONTENT])
    }
}

/// A presentation held entirely in memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    slides: Vec<Slide>,
    #[serde(skip, default = "default_max_slides")]
    max_slides: usize,
}

fn default_max_slides() -> usize {
    DEFAULT_MAX_SLIDES
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SLIDES)
    }
}

impl Presentation {
    /// An empty deck holding at most `max_slides` slides
    pub fn new(max_slides: usize) -> Self {
        tracing::info!("Created new blank presentation");
        Self {
            slides: Vec::new(),
            max_slides,
        }
    }

    /// Load a deck previously written by `save`
    pub fn open(path: &Path, max_slides: usize) -> Result<Self> {
        if !path.exists() {
            return Err(DeckError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let mut deck: Presentation = serde_json::from_str(&content)?;
        deck.max_slides = max_slides;
        tracing::info!("Loaded presentation {} ({} slides)", path.display(), deck.slides.len());
        Ok(deck)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: SlideIndex) -> Option<&Slide> {
        self.slides.get(index)
    }

    fn slide_mut(&mut self, index: SlideIndex) -> Result<&mut Slide> {
        let count = self.slides.len();
        self.slides
            .get_mut(index)
            .ok_or(DeckError::SlideOutOfRange { index, count })
    }
}

impl SlideDeck for Presentation {
    fn add_slide(
        &mut self,
        layout: LayoutIndex,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<SlideIndex> {
        if self.slides.len() >= self.max_slides {
            return Err(DeckError::SlideLimit(self.max_slides));
        }

        let layout = if layout_at(layout).is_some() {
            layout
        } else {
            LAYOUT_CONTENT
        };

        let mut slide = Slide::new(layout);
        let info = slide.layout_info();
        if info.has_title && !title.is_empty() {
            slide.title = Some(title.to_string());
        }
        if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
            if info.has_body {
                slide.body = Some(subtitle.to_string());
            }
        }

        self.slides.push(slide);
        let index = self.slides.len() - 1;
        tracing::info!("Added slide {} with layout: {}", index + 1, info.name);
        Ok(index)
    }

    fn delete_slide(&mut self, index: SlideIndex) -> Result<()> {
        let count = self.slides.len();
        if index >= count {
            return Err(DeckError::SlideOutOfRange { index, count });
        }
        if count == 1 {
            return Err(DeckError::LastSlide);
        }

        self.slides.remove(index);
        tracing::info!("Deleted slide {}", index + 1);
        Ok(())
    }

    fn update_text(
        &mut self,
        index: SlideIndex,
        update: &TextUpdate,
        style: TextStyle,
    ) -> Result<()> {
        let slide = self.slide_mut(index)?;
        let info = slide.layout_info();

        if let Some(title) = &update.title {
            if info.has_title {
                slide.title = Some(title.clone());
                slide.title_style = style;
            } else {
                tracing::debug!("Layout {} has no title placeholder", info.name);
            }
        }

        if let Some(body) = &update.body {
            if info.has_body {
                slide.body = Some(body.clone());
                slide.body_style = style;
            } else {
                tracing::debug!("Layout {} has no body placeholder", info.name);
            }
        }

        tracing::info!("Updated text in slide {}", index + 1);
        Ok(())
    }

    fn insert_chart(
        &mut self,
        index: SlideIndex,
        chart_type: ChartType,
        data: &ChartData,
        position: Option<Inches>,
        size: Option<Inches>,
    ) -> Result<()> {
        if data.categories.is_empty() || data.series.is_empty() {
            return Err(DeckError::InvalidChartData(
                "chart needs at least one category and one series".into(),
            ));
        }
        if let Some(series) = data
            .series
            .iter()
            .find(|s| s.values.len() != data.categories.len())
        {
            return Err(DeckError::InvalidChartData(format!(
                "series '{}' has {} values for {} categories",
                series.name,
                series.values.len(),
                data.categories.len()
            )));
        }

        let slide = self.slide_mut(index)?;
        slide.charts.push(ChartShape {
            chart_type,
            data: data.clone(),
            position: position.unwrap_or(DEFAULT_CHART_POSITION),
            size: size.unwrap_or(DEFAULT_CHART_SIZE),
        });

        tracing::info!("Added {} chart to slide {}", chart_type, index + 1);
        Ok(())
    }

    fn insert_image(
        &mut self,
        index: SlideIndex,
        path: &Path,
        position: Option<Inches>,
        size: Option<Inches>,
    ) -> Result<()> {
        let slide = self.slide_mut(index)?;
        if !path.exists() {
            return Err(DeckError::FileNotFound(path.to_path_buf()));
        }

        slide.pictures.push(Picture {
            path: path.to_path_buf(),
            position: position.unwrap_or(DEFAULT_PICTURE_POSITION),
            size,
        });

        tracing::info!("Added image {} to slide {}", path.display(), index + 1);
        Ok(())
    }

    fn change_background(&mut self, index: SlideIndex, fill: &BackgroundFill) -> Result<()> {
        let slide = self.slide_mut(index)?;
        if let BackgroundFill::Image(path) = fill {
            if !path.exists() {
                return Err(DeckError::FileNotFound(path.clone()));
            }
        }

        slide.background = fill.clone();
        tracing::info!("Applied background {:?} to slide {}", fill, index + 1);
        Ok(())
    }

    fn modify_layout(&mut self, index: SlideIndex, layout: LayoutIndex) -> Result<()> {
        let new_layout = layout_at(layout).ok_or(DeckError::LayoutOutOfRange(layout))?;
        let slide = self.slide_mut(index)?;

        if !new_layout.has_title && slide.title.take().is_some() {
            tracing::debug!("Dropped title: {} has no title placeholder", new_layout.name);
        }
        if !new_layout.has_body && slide.body.take().is_some() {
            tracing::debug!("Dropped body: {} has no body placeholder", new_layout.name);
        }
        slide.layout = layout;

        tracing::info!("Changed slide {} to layout: {}", index + 1, new_layout.name);
        Ok(())
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn slide_title(&self, index: SlideIndex) -> Option<String> {
        self.slides.get(index).and_then(|s| s.title.clone())
    }

    fn save(&self, path: &Path) -> Result<PathBuf> {
        let path = PathBuf::from(with_deck_extension(&path.to_string_lossy()));
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        tracing::info!("Presentation saved as: {}", path.display());
        Ok(path)
    }
}
