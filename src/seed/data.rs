use serde::{Deserialize, Serialize};

const AGENT_AVATARS: &[&str] = &[
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?q=80&w=640",
    "https://images.unsplash.com/photo-1534528741775-53994a69daeb?q=80&w=640",
    "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?q=80&w=640",
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=640",
];

const REVIEW_AVATARS: &[&str] = &[
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?q=80&w=640",
    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?q=80&w=640",
    "https://images.unsplash.com/photo-1544005313-94ddf0286df2?q=80&w=640",
    "https://images.unsplash.com/photo-1547425260-76bcadfb4f2c?q=80&w=640",
];

const GALLERY_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?q=80&w=1200",
    "https://images.unsplash.com/photo-1600596542815-ffad4c1539a9?q=80&w=1200",
    "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?q=80&w=1200",
    "https://images.unsplash.com/photo-1600566753190-17f0baa2a6c3?q=80&w=1200",
    "https://images.unsplash.com/photo-1600585154526-990dced4db0d?q=80&w=1200",
    "https://images.unsplash.com/photo-1600573472592-401b489a3cdc?q=80&w=1200",
    "https://images.unsplash.com/photo-1600210492486-724fe5c67fb0?q=80&w=1200",
    "https://images.unsplash.com/photo-1600047509807-ba8f99d2cdde?q=80&w=1200",
    "https://images.unsplash.com/photo-1600121848594-d8644e57abab?q=80&w=1200",
    "https://images.unsplash.com/photo-1600563438938-a9a27216b4f5?q=80&w=1200",
];

const PROPERTY_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1568605114967-8130f3a36994?q=80&w=1200",
    "https://images.unsplash.com/photo-1570129477492-45c003edd2be?q=80&w=1200",
    "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?q=80&w=1200",
    "https://images.unsplash.com/photo-1580587771525-78b9dba3b914?q=80&w=1200",
    "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?q=80&w=1200",
    "https://images.unsplash.com/photo-1613490493576-7fde63acd811?q=80&w=1200",
    "https://images.unsplash.com/photo-1605276374104-dee2a0ed3cd6?q=80&w=1200",
    "https://images.unsplash.com/photo-1583608205776-bfd35f0d9f83?q=80&w=1200",
    "https://images.unsplash.com/photo-1576941089067-2de3c901e126?q=80&w=1200",
    "https://images.unsplash.com/photo-1598228723793-52759bba239c?q=80&w=1200",
];

fn owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(|url| url.to_string()).collect()
}

/// Image pools the synthetic listings draw from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedAssets {
    pub agent_avatars: Vec<String>,
    pub review_avatars: Vec<String>,
    /// One gallery document is created per entry.
    pub gallery_images: Vec<String>,
    pub property_images: Vec<String>,
}

impl Default for SeedAssets {
    fn default() -> Self {
        Self {
            agent_avatars: owned(AGENT_AVATARS),
            review_avatars: owned(REVIEW_AVATARS),
            gallery_images: owned(GALLERY_IMAGES),
            property_images: owned(PROPERTY_IMAGES),
        }
    }
}

impl SeedAssets {
    pub fn with_agent_avatars<I, S>(mut self, avatars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.agent_avatars = avatars.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gallery_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gallery_images = images.into_iter().map(Into::into).collect();
        self
    }
}
