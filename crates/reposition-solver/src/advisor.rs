// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::plan::RelocationMove;

/// Turns an optimal relocation plan into short advisory lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisor {
    urgent_day_cutoff: usize,
}

impl Advisor {
    #[inline]
    pub fn new(urgent_day_cutoff: usize) -> Self {
        Self { urgent_day_cutoff }
    }

    pub fn recommend(&self, relocations: &[RelocationMove], total_cost: f64) -> Vec<String> {
        let mut out = Vec::with_capacity(3);

        let urgent = relocations.iter().filter(|m| m.is_urgent()).count();
        if urgent > 0 {
            out.push(format!(
                "{} urgent relocations needed within {} days",
                urgent,
                self.urgent_day_cutoff + 1
            ));
        }
        if !relocations.is_empty() {
            out.push(format!(
                "Total optimized movements: {} container relocations",
                relocations.len()
            ));
        }
        out.push(format!("Estimated total cost: {}", format_usd(total_cost)));
        out
    }
}

/// `1234567.891` -> `$1,234,567.89`
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}
