use revery_shared::similarity::{DimensionMismatch, cosine_distance};

/// Select the `n` candidates closest to `query` by cosine distance.
///
/// This is a full linear scan. Candidates are ordered ascending by distance
/// and the sort is stable, so equal distances keep their input order. Asking
/// for more than there are returns everything, ranked.
///
/// # Errors
///
/// Returns [`DimensionMismatch`] as soon as one candidate's dimension differs
/// from the query's.
pub fn top_n<'v, P, I>(candidates: I, query: &[f32], n: usize) -> Result<Vec<P>, DimensionMismatch>
where
  I: IntoIterator<Item = (&'v [f32], P)>,
{
  let mut scored = candidates
    .into_iter()
    .map(|(vector, payload)| cosine_distance(vector, query).map(|d| (d, payload)))
    .collect::<Result<Vec<_>, _>>()?;

  scored.sort_by(|a, b| a.0.total_cmp(&b.0));
  scored.truncate(n);

  Ok(scored.into_iter().map(|(_, payload)| payload).collect())
}
