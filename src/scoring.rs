use tracing::{debug, info};

use crate::error::{Result, SurveyError};
use crate::items::{ItemGroup, MIN_ANSWERED_ITEMS};
use crate::models::{NumericDataset, ScoredDataset, ScoredRecord, ValidDataset, ValidRecord};

/// Keep respondents who answered at least `MIN_ANSWERED_ITEMS` of the 20 items.
pub fn filter_respondents(dataset: NumericDataset) -> Result<ValidDataset> {
    let total_respondents = dataset.records.len();
    let records: Vec<ValidRecord> = dataset
        .records
        .into_iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let answered = record.answered();
            if answered >= MIN_ANSWERED_ITEMS {
                Some(ValidRecord::new_unchecked(record))
            } else {
                debug!(row, answered, "dropping incomplete respondent");
                None
            }
        })
        .collect();

    info!(
        total = total_respondents,
        retained = records.len(),
        "filtered respondents"
    );

    if records.is_empty() {
        return Err(SurveyError::NoValidRespondents {
            total: total_respondents,
            min_answered: MIN_ANSWERED_ITEMS,
        });
    }

    Ok(ValidDataset {
        passthrough_columns: dataset.passthrough_columns,
        records,
        total_respondents,
    })
}

/// Sum and mean over the answered values only. Each row uses its own denominator.
pub fn composite(values: &[Option<f64>]) -> (f64, f64) {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    let mean = if count == 0 { f64::NAN } else { sum / count as f64 };
    (sum, mean)
}

pub fn score(dataset: ValidDataset) -> ScoredDataset {
    let records = dataset
        .records
        .into_iter()
        .map(|record| {
            let (x_total, x_mean) = composite(record.record().group(ItemGroup::X));
            let (y_total, y_mean) = composite(record.record().group(ItemGroup::Y));
            ScoredRecord {
                record,
                x_total,
                y_total,
                x_mean,
                y_mean,
            }
        })
        .collect();

    ScoredDataset {
        passthrough_columns: dataset.passthrough_columns,
        records,
        total_respondents: dataset.total_respondents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::TOTAL_ITEMS;
    use crate::models::NumericRecord;
    use proptest::prelude::*;

    fn record_with_missing(missing: &[usize]) -> NumericRecord {
        let mut answers = [Some(4.0); TOTAL_ITEMS];
        for &index in missing {
            answers[index] = None;
        }
        NumericRecord {
            passthrough: vec![],
            answers,
        }
    }

    fn dataset(records: Vec<NumericRecord>) -> NumericDataset {
        NumericDataset {
            passthrough_columns: vec![],
            records,
        }
    }

    #[test]
    fn keeps_nineteen_of_twenty_and_drops_seventeen() {
        let kept = record_with_missing(&[3]);
        let dropped = record_with_missing(&[0, 5, 12]);
        let valid = filter_respondents(dataset(vec![kept.clone(), dropped])).unwrap();

        assert_eq!(valid.total_respondents, 2);
        assert_eq!(valid.records.len(), 1);
        assert_eq!(valid.records[0].record(), &kept);
    }

    #[test]
    fn eighteen_answers_is_the_boundary() {
        let valid = filter_respondents(dataset(vec![record_with_missing(&[0, 19])])).unwrap();
        assert_eq!(valid.records.len(), 1);
    }

    #[test]
    fn no_survivors_is_an_error() {
        let result = filter_respondents(dataset(vec![record_with_missing(&[0, 1, 2])]));
        match result {
            Err(SurveyError::NoValidRespondents { total, .. }) => assert_eq!(total, 1),
            other => panic!("expected no valid respondents, got {other:?}"),
        }
    }

    #[test]
    fn composite_ignores_missing_in_numerator_and_denominator() {
        let (total, mean) = composite(&[Some(5.0), None, Some(3.0), Some(4.0)]);
        assert_eq!(total, 12.0);
        assert_eq!(mean, 4.0);
    }

    #[test]
    fn scores_each_group_independently() {
        let mut record = record_with_missing(&[0]);
        for answer in record.answers.iter_mut().skip(10) {
            *answer = Some(2.0);
        }
        let valid = filter_respondents(dataset(vec![record])).unwrap();
        let scored = score(valid);
        let row = &scored.records[0];

        assert_eq!(row.x_total, 36.0);
        assert_eq!(row.x_mean, 4.0);
        assert_eq!(row.y_total, 20.0);
        assert_eq!(row.y_mean, 2.0);
    }

    proptest! {
        #[test]
        fn prop_retained_records_answer_between_18_and_20(
            masks in proptest::collection::vec(
                proptest::collection::vec(proptest::bool::weighted(0.1), TOTAL_ITEMS),
                1..40,
            )
        ) {
            let records: Vec<NumericRecord> = masks
                .iter()
                .map(|mask| {
                    let missing: Vec<usize> = mask
                        .iter()
                        .enumerate()
                        .filter(|(_, &is_missing)| is_missing)
                        .map(|(index, _)| index)
                        .collect();
                    record_with_missing(&missing)
                })
                .collect();

            if let Ok(valid) = filter_respondents(dataset(records)) {
                for record in &valid.records {
                    let x = record.record().group(ItemGroup::X).iter().flatten().count();
                    let y = record.record().group(ItemGroup::Y).iter().flatten().count();
                    prop_assert!((18..=20).contains(&(x + y)));
                }
            }
        }
    }
}
