//! Picking one question per level for a sampled topic

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::ExamStore;
use crate::error::Result;
use crate::model::{CompetencyId, Level, QuestionId, TopicId, Triplet};

#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionPicker;

impl QuestionPicker {
    /// Pick a junior, middle and senior question from `topic`.
    ///
    /// Returns `None` if a level has no question any more; the caller counts
    /// the topic as unfilled instead of persisting a partial triplet.
    pub fn pick<S: ExamStore + ?Sized, R: Rng>(
        &self,
        store: &S,
        competency: CompetencyId,
        topic: TopicId,
        rng: &mut R,
    ) -> Result<Option<Triplet>> {
        let mut questions = [QuestionId(0); 3];
        for (slot, level) in questions.iter_mut().zip(Level::ALL) {
            let candidates = store.questions_by_level(topic, level)?;
            match candidates.choose(rng) {
                Some(question) => *slot = *question,
                None => {
                    tracing::warn!(
                        %competency,
                        %topic,
                        %level,
                        "topic lost its last question at level; dropping it"
                    );
                    return Ok(None);
                }
            }
        }

        Ok(Some(Triplet {
            competency,
            topic,
            questions,
        }))
    }
}
