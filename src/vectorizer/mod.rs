use crate::TagTraceResult;
use crate::bitmap::Bitmap;

/// A trait representing an algorithm that can turn a bitmap into a vector representation.
pub trait BitmapVectorizer {
    type Options;
    type Output;

    fn vectorize(&self, bitmap: &Bitmap, options: &Self::Options) -> TagTraceResult<Self::Output>;
}

pub mod svg;
