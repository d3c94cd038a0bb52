use super::error::{EngineError, Result};

/// Ordered, fixed-length collection of opaque slides. Never empty.
#[derive(Debug, Clone)]
pub struct SlideSet<S> {
    slides: Vec<S>,
}

impl<S> SlideSet<S> {
    pub fn new(slides: Vec<S>) -> Result<Self> {
        if slides.is_empty() {
            return Err(EngineError::InvalidInput(
                "a presentation needs at least one slide".to_string(),
            ));
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.slides.iter()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }
}

impl<S> TryFrom<Vec<S>> for SlideSet<S> {
    type Error = EngineError;

    fn try_from(slides: Vec<S>) -> Result<Self> {
        Self::new(slides)
    }
}

impl<S> std::ops::Index<usize> for SlideSet<S> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.slides[index]
    }
}

impl<'a, S> IntoIterator for &'a SlideSet<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_rejected() {
        let result = SlideSet::<u8>::new(Vec::new());
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_single_slide() {
        let set = SlideSet::new(vec!["only"]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.last_index(), 0);
        assert_eq!(set.get(0), Some(&"only"));
        assert_eq!(set.get(1), None);
    }
}
