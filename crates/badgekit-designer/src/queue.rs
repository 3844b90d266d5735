//! Queue of finished designs waiting to be laid out and exported.

use badgekit_core::DesignerError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::commands::QueueCommand;
use crate::packing::ItemSize;
use crate::templates::BadgeTemplate;

/// A rendered design. Immutable once created.
#[derive(Debug, Clone)]
pub struct QueueItem {
    id: Uuid,
    raster: Vec<u8>,
    template: BadgeTemplate,
    width_mm: f64,
    height_mm: f64,
    created_at: DateTime<Utc>,
}

impl QueueItem {
    /// Wrap an export raster (PNG bytes) for `template`. The physical size
    /// is the template's bleed size.
    pub fn new(raster: Vec<u8>, template: BadgeTemplate) -> Self {
        Self {
            id: Uuid::new_v4(),
            raster,
            width_mm: template.bleed_width_mm,
            height_mm: template.bleed_height_mm,
            template,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// PNG-encoded export raster
    pub fn raster(&self) -> &[u8] {
        &self.raster
    }

    pub fn template(&self) -> &BadgeTemplate {
        &self.template
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn size(&self) -> ItemSize {
        ItemSize::new(self.width_mm, self.height_mm)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ordered list of queued designs
#[derive(Debug, Clone, Default)]
pub struct DesignQueue {
    items: Vec<QueueItem>,
}

impl DesignQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its id
    pub fn push(&mut self, item: QueueItem) -> Uuid {
        let id = item.id();
        tracing::debug!(
            "Queue push {} ({}) rendered at {}",
            id,
            item.template().key,
            item.created_at().format("%H:%M:%S%.3f")
        );
        self.items.push(item);
        id
    }

    /// Remove the item with `id`. Later items move up by one.
    pub fn remove(&mut self, id: Uuid) -> Result<QueueItem, DesignerError> {
        let index = self
            .position(id)
            .ok_or_else(|| DesignerError::ItemNotFound {
                reference: id.to_string(),
            })?;
        Ok(self.items.remove(index))
    }

    /// Remove the item at `index`. Later items move up by one.
    pub fn remove_at(&mut self, index: usize) -> Result<QueueItem, DesignerError> {
        if index >= self.items.len() {
            return Err(DesignerError::ItemNotFound {
                reference: format!("#{}", index),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Apply a queue command. Returns the number of items removed.
    pub fn apply(&mut self, command: QueueCommand) -> Result<usize, DesignerError> {
        let removed = match command {
            QueueCommand::Remove { id } => self.remove(id).map(|_| 1)?,
            QueueCommand::RemoveAt { index } => self.remove_at(index).map(|_| 1)?,
            QueueCommand::Clear => {
                let count = self.items.len();
                self.clear();
                count
            }
        };
        tracing::info!("{}: {} removed, {} left", command.name(), removed, self.len());
        Ok(removed)
    }

    pub fn get(&self, id: Uuid) -> Option<&QueueItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    /// Physical sizes in queue order
    pub fn sizes(&self) -> Vec<ItemSize> {
        self.items.iter().map(QueueItem::size).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
