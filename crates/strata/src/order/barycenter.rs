use crate::graphlib::Graph;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Weighted mean order of each movable node's neighbors in `lg`.
///
/// Nodes with no neighbors, or whose neighbor edges all weigh zero, get no barycenter and keep
/// their current slot during sorting.
pub fn barycenter(
    lg: &Graph<(), f64, ()>,
    movable: &[String],
    order_of: impl Fn(&str) -> Option<usize>,
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|v| {
            let mut sum = 0.0;
            let mut weight = 0.0;
            for key in lg.in_edges(v) {
                let w = lg.edge_by_key(&key).copied().unwrap_or(0.0);
                let order = order_of(&key.v).unwrap_or(0) as f64;
                sum += w * order;
                weight += w;
            }
            if weight == 0.0 {
                return BarycenterEntry {
                    v: v.clone(),
                    barycenter: None,
                    weight: None,
                };
            }
            BarycenterEntry {
                v: v.clone(),
                barycenter: Some(sum / weight),
                weight: Some(weight),
            }
        })
        .collect()
}
