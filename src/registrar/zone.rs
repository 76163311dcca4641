/// Zone names to look up for `domain_name`, most specific first.
///
/// A name with two or fewer labels is its own zone. Longer names drop their
/// leftmost label, then keep dropping one label at a time down to two, so
/// `a.b.example.com` yields `b.example.com` then `example.com`.
///
/// Names are taken verbatim: a trailing dot counts as an empty label, so
/// `www.example.com.` yields `example.com.` then `com.`.
pub fn zone_candidates(domain_name: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut rest = domain_name;

    while label_count(rest) > 2 {
        match rest.split_once('.') {
            Some((_, parent)) => {
                rest = parent;
                candidates.push(rest);
            }
            None => break,
        }
    }

    if candidates.is_empty() {
        candidates.push(domain_name);
    }

    candidates
}

fn label_count(name: &str) -> usize {
    name.split('.').count()
}
