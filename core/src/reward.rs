use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

pub const REWARD_IMAGE_COUNT: ImageNumber = 12;

/// Every reward image that can hide behind a board.
pub fn all_reward_images() -> impl Iterator<Item = ImageNumber> {
    1..=REWARD_IMAGE_COUNT
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardImage {
    pub number: ImageNumber,
    pub url: String,
}

impl RewardImage {
    pub fn new(number: ImageNumber) -> Self {
        Self {
            number,
            url: format!("/assets/{number}.png"),
        }
    }
}

/// Reward images ever fully revealed; only grows until progress is reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedImages(BTreeSet<ImageNumber>);

impl UnlockedImages {
    pub fn contains(&self, number: ImageNumber) -> bool {
        self.0.contains(&number)
    }

    /// Returns whether the image was newly unlocked.
    pub fn insert(&mut self, number: ImageNumber) -> bool {
        self.0.insert(number)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ImageNumber> {
        self.0.iter().copied()
    }
}

impl FromIterator<ImageNumber> for UnlockedImages {
    fn from_iter<I: IntoIterator<Item = ImageNumber>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Picks the image for a new session, preferring images that were never unlocked.
///
/// Once the whole catalogue is unlocked, images are recycled from the full catalogue.
pub fn select_background_image<R: Rng + ?Sized>(
    rng: &mut R,
    unlocked: &UnlockedImages,
    catalogue: &[ImageNumber],
) -> RewardImage {
    let unseen: Vec<ImageNumber> = catalogue
        .iter()
        .copied()
        .filter(|&number| !unlocked.contains(number))
        .collect();
    let candidates = if unseen.is_empty() {
        catalogue
    } else {
        &unseen[..]
    };

    let number = match pick_random(rng, candidates) {
        Some(&number) => number,
        None => {
            log::warn!("Reward catalogue is empty, falling back to the first image");
            1
        }
    };
    RewardImage::new(number)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GalleryEntry {
    pub number: ImageNumber,
    pub unlocked: bool,
}

impl GalleryEntry {
    /// Only unlocked images show their picture.
    pub fn image(&self) -> Option<RewardImage> {
        self.unlocked.then(|| RewardImage::new(self.number))
    }
}

/// Reward catalogue as shown in the gallery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    pub fn new(unlocked: &UnlockedImages) -> Self {
        let entries = all_reward_images()
            .map(|number| GalleryEntry {
                number,
                unlocked: unlocked.contains(number),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn collected(&self) -> usize {
        self.entries.iter().filter(|entry| entry.unlocked).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }
}
