/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use std::borrow::Cow;

const ESCAPES: &[char] = &['&', '\'', '\"', '<', '>', '\r', '\n'];

pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    let mut remaining = s;
    if !s.contains(ESCAPES) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 12);
    while let Some(idx) = remaining.find(ESCAPES) {
        out.push_str(&remaining[..idx]);
        remaining = &remaining[idx..];
        let mut idxs = remaining.char_indices();
        let (_, chr) = match idxs.next() {
            Some(next) => next,
            None => break,
        };
        match chr {
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '\r' => out.push_str("&#xD;"),
            '\n' => out.push_str("&#xA;"),
            _ => unreachable!("unexpected escape char: {:?}", chr),
        }
        remaining = match idxs.next() {
            None => "",
            Some((idx, _)) => &remaining[idx..],
        }
    }
    out.push_str(remaining);
    Cow::Owned(out)
}
