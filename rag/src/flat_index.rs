use crate::error::RagError;

const MAGIC: u32 = 0x4649_4458; // "FIDX"
const VERSION: u32 = 1;

/// Brute-force flat index over fixed-dimension vectors.
///
/// Search computes the squared Euclidean distance against every stored vector
/// and sorts ascending, ties broken by smaller position. Exhaustive on
/// purpose: the corpus is small and reproducibility matters more than
/// sub-linear lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    dim: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    /// Builds an index over `vectors` in the given order. Positions are dense
    /// `0..N-1` insertion indices.
    pub fn build(vectors: &[Vec<f32>]) -> Result<Self, RagError> {
        let dim = vectors.first().map(|v| v.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(dim * vectors.len());
        for (pos, v) in vectors.iter().enumerate() {
            if v.len() != dim {
                return Err(RagError::DimensionMismatch(format!(
                    "vector {} has dimension {}, expected {}",
                    pos,
                    v.len(),
                    dim
                )));
            }
            data.extend_from_slice(v);
        }
        Ok(Self { dim, data })
    }

    pub fn len(&self) -> usize {
        if self.dim == 0 { 0 } else { self.data.len() / self.dim }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns up to `k` `(position, squared_distance)` pairs, closest first.
    /// `k == 0` yields an empty result.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>, RagError> {
        if query.len() != self.dim {
            return Err(RagError::DimensionMismatch(format!(
                "query has dimension {}, index has {}",
                query.len(),
                self.dim
            )));
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<(usize, f32)> = self
            .data
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(pos, row)| {
                let dist = row
                    .iter()
                    .zip(query)
                    .map(|(a, b)| {
                        let d = a - b;
                        d * d
                    })
                    .sum::<f32>();
                (pos, dist)
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        hits.truncate(k.min(self.len()));
        Ok(hits)
    }

    /// Serializes to `magic, version, dim, count` header (u32 LE each)
    /// followed by `count * dim` f32 LE values.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + self.data.len() * 4);
        out.extend_from_slice(&MAGIC.to_le_bytes());
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&(self.dim as u32).to_le_bytes());
        out.extend_from_slice(&(self.len() as u32).to_le_bytes());
        for v in &self.data {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Reconstructs an index from `to_bytes` output. Stored vectors are
    /// reproduced bit-exactly, so search results match the original index.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RagError> {
        let mut r = Reader::new(bytes);
        let magic = r.u32()?;
        if magic != MAGIC {
            return Err(RagError::DimensionMismatch(
                "bad magic in serialized index".to_string(),
            ));
        }
        let version = r.u32()?;
        if version != VERSION {
            return Err(RagError::DimensionMismatch(format!(
                "unsupported index version {version}"
            )));
        }
        let dim = r.u32()? as usize;
        let count = r.u32()? as usize;
        // The header is untrusted input: check it against the actual payload
        // size before allocating anything from it.
        let payload = dim.checked_mul(count).and_then(|n| n.checked_mul(4));
        if payload != Some(r.remaining()) {
            return Err(RagError::DimensionMismatch(format!(
                "header claims {count} vectors of dimension {dim} but payload holds {} bytes",
                r.remaining()
            )));
        }
        let mut data = Vec::with_capacity(dim * count);
        for _ in 0..dim * count {
            data.push(r.f32()?);
        }
        Ok(Self { dim, data })
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], RagError> {
        let end = self.pos.checked_add(n).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                let out = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(out)
            }
            None => Err(RagError::DimensionMismatch(
                "serialized index truncated".to_string(),
            )),
        }
    }

    fn u32(&mut self) -> Result<u32, RagError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f32(&mut self) -> Result<f32, RagError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}
