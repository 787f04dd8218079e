//! 文字列類似度
//!
//! Ratcliff/Obershelp方式: 最長共通ブロックを再帰的に拾い、
//! 一致文字数 M と総文字数 T から 2M/T を類似度とする。

/// 類似度を計算 (0.0-1.0)
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();

    if total == 0 {
        return 1.0;
    }

    let matched = matching_characters(&a_chars, &b_chars);
    2.0 * matched as f64 / total as f64
}

/// 候補の中で閾値以上かつ最も近いものを返す
///
/// 同点の場合は辞書順で大きい候補を採用する。
pub fn best_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = similarity(candidate, word);
        if score < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, current_score)) => {
                score > current_score || (score == current_score && candidate > current)
            }
        };
        if better {
            best = Some((candidate, score));
        }
    }

    best
}

/// 一致ブロックの総文字数
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// 範囲内の最長共通ブロック (aの開始, bの開始, 長さ)
///
/// 同じ長さなら a 側で先に現れるもの、次に b 側で先に現れるものを返す。
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // prev[j] = a[..i] と b[..j] の末尾共通長
    let mut prev = vec![0usize; bhi + 1];

    for i in alo..ahi {
        let mut current = vec![0usize; bhi + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = if j > blo { prev[j] + 1 } else { 1 };
                current[j + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = current;
    }

    best
}
