use super::resolve_conflicts::ConflictEntry;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct SortResult {
    pub vs: Vec<String>,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Sorts entries with a barycenter by it; entries without one keep their original index `i`.
///
/// Ties between equal barycenters go to the lower `i`, or to the higher one when `bias_right`.
pub fn sort(entries: Vec<ConflictEntry>, bias_right: bool) -> SortResult {
    let (mut sortable, mut unsortable): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|e| e.barycenter.is_some());
    // Descending by index so the next slot to fill is at the end.
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| compare_with_bias(a, b, bias_right));

    let mut vs: Vec<String> = Vec::new();
    let mut sum = 0.0;
    let mut weight = 0.0;
    let mut vs_index = consume_unsortable(&mut vs, &mut unsortable, 0);
    for entry in sortable {
        vs_index += entry.vs.len();
        let w = entry.weight.unwrap_or(0.0);
        sum += entry.barycenter.unwrap_or(0.0) * w;
        weight += w;
        vs.extend(entry.vs);
        vs_index = consume_unsortable(&mut vs, &mut unsortable, vs_index);
    }
    // Anything left had an index past the end of the sortable run.
    while let Some(entry) = unsortable.pop() {
        vs.extend(entry.vs);
    }

    if weight != 0.0 {
        SortResult {
            vs,
            barycenter: Some(sum / weight),
            weight: Some(weight),
        }
    } else {
        SortResult {
            vs,
            barycenter: None,
            weight: None,
        }
    }
}

fn consume_unsortable(
    vs: &mut Vec<String>,
    unsortable: &mut Vec<ConflictEntry>,
    mut index: usize,
) -> usize {
    while unsortable.last().is_some_and(|last| last.i <= index) {
        let Some(last) = unsortable.pop() else {
            break;
        };
        vs.extend(last.vs);
        index += 1;
    }
    index
}

fn compare_with_bias(a: &ConflictEntry, b: &ConflictEntry, bias_right: bool) -> Ordering {
    let (ab, bb) = (a.barycenter.unwrap_or(0.0), b.barycenter.unwrap_or(0.0));
    if ab < bb {
        return Ordering::Less;
    }
    if ab > bb {
        return Ordering::Greater;
    }
    if bias_right {
        b.i.cmp(&a.i)
    } else {
        a.i.cmp(&b.i)
    }
}
