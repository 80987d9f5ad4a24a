use futures::stream::{BoxStream, StreamExt};
use log::debug;

use crate::error::Result;

/// One incremental piece of a streamed model response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Text content; `None` for non-text parts
    pub text: Option<String>,
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Fragment {
            text: Some(text.into()),
        }
    }

    /// A part without text, such as inline data or a safety signal
    pub fn empty() -> Self {
        Fragment { text: None }
    }
}

/// Lazy, finite sequence of fragments produced by one generation call
pub type FragmentStream = BoxStream<'static, Result<Fragment>>;

/// Concatenates streamed fragments in arrival order
#[derive(Debug, Default)]
pub struct RecipeAccumulator {
    text: String,
    fragments: usize,
    skipped: usize,
}

impl RecipeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment; fragments without text are dropped
    pub fn push(&mut self, fragment: Fragment) {
        match fragment.text {
            Some(text) if !text.is_empty() => {
                self.text.push_str(&text);
                self.fragments += 1;
            }
            _ => self.skipped += 1,
        }
    }

    /// Number of fragments that contributed text
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Complete recipe text; empty if no fragment carried text
    pub fn finish(self) -> String {
        if self.skipped > 0 {
            debug!("Skipped {} fragments without text", self.skipped);
        }
        self.text
    }
}

/// Drain a fragment stream into one string.
///
/// The first error aborts the drain and the partial text is discarded.
pub async fn collect_fragments(mut stream: FragmentStream) -> Result<String> {
    let mut accumulator = RecipeAccumulator::new();
    while let Some(fragment) = stream.next().await {
        accumulator.push(fragment?);
    }
    debug!("Assembled recipe from {} fragments", accumulator.fragment_count());
    Ok(accumulator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecipeError;
    use crate::model::{RecipeFlow, RecipeResult};
    use futures::stream;

    fn stream_of(items: Vec<Result<Fragment>>) -> FragmentStream {
        stream::iter(items).boxed()
    }

    #[tokio::test]
    async fn test_fragments_concatenate_in_order() {
        let fragments = stream_of(vec![
            Ok(Fragment::text("Chicken ")),
            Ok(Fragment::text("Biryani\n")),
            Ok(Fragment::text("Serves 4")),
        ]);

        let text = collect_fragments(fragments).await.unwrap();
        assert_eq!(text, "Chicken Biryani\nServes 4");
        assert_eq!(RecipeResult::new(text, RecipeFlow::Text).title(), "Chicken Biryani");
    }

    #[tokio::test]
    async fn test_non_text_fragments_are_skipped() {
        let fragments = stream_of(vec![
            Ok(Fragment::text("Nihari")),
            Ok(Fragment::empty()),
            Ok(Fragment::text("")),
            Ok(Fragment::text("\nServes 6")),
        ]);

        assert_eq!(collect_fragments(fragments).await.unwrap(), "Nihari\nServes 6");
    }

    #[tokio::test]
    async fn test_empty_stream_yields_empty_text() {
        let text = collect_fragments(stream_of(Vec::new())).await.unwrap();
        assert_eq!(text, "");
        assert_eq!(RecipeResult::new(text, RecipeFlow::Image).title(), "Image-based Recipe");
    }

    #[tokio::test]
    async fn test_error_discards_partial_text() {
        let fragments = stream_of(vec![
            Ok(Fragment::text("Half a recipe")),
            Err(RecipeError::Stream("connection reset".to_string())),
            Ok(Fragment::text("never read")),
        ]);

        let err = collect_fragments(fragments).await.unwrap_err();
        assert!(matches!(err, RecipeError::Stream(_)));
    }

    #[test]
    fn test_accumulator_counts() {
        let mut accumulator = RecipeAccumulator::new();
        accumulator.push(Fragment::text("a"));
        accumulator.push(Fragment::empty());
        accumulator.push(Fragment::text("b"));
        assert_eq!(accumulator.fragment_count(), 2);
        assert_eq!(accumulator.finish(), "ab");
    }
}
