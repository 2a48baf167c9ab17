// ==========================================
// Smart-Feed 多相喂料优化系统 - 配比枚举器
// ==========================================
// 职责: 生成所有合法的废料混合配比
// 输入: 子集流数量 + 配比总和上限
// 输出: 整数配比向量集合（每个合法向量恰好出现一次）
// ==========================================
// Bounds:
//   1. sum(配比分量) ≤ max_sum
//   2. GCD = 1 (去除等比缩放重复, 如 4:2 ≡ 2:1)
//   3. 每个分量 ≥ 1 (组内所有流都参与)
// 注: (1,2) 和 (2,1) 视为不同配比（A多B少 vs A少B多）
// ==========================================

// ==========================================
// RatioEnumerator - 配比枚举引擎
// ==========================================
pub struct RatioEnumerator;

impl RatioEnumerator {
    /// 生成 n_streams 个分量的所有合法配比
    ///
    /// # 参数
    /// - n_streams: 参与混合的废料流数量 (1-5)
    /// - max_sum: 配比总和上限 (≥ n_streams)
    ///
    /// # 返回
    /// 所有合法配比向量; 枚举顺序对调用方不可见（调用方不得依赖）
    pub fn generate(n_streams: usize, max_sum: u32) -> Vec<Vec<u32>> {
        // 单流只有一种配比
        if n_streams <= 1 {
            return vec![vec![1]];
        }

        // 单个分量的最大值: 其余分量各取最小值 1
        let upper = max_sum.saturating_sub(n_streams as u32 - 1);
        if upper == 0 {
            return Vec::new();
        }

        let mut results = Vec::new();
        let mut combo = vec![1u32; n_streams];

        loop {
            let sum: u32 = combo.iter().sum();
            if sum <= max_sum && Self::gcd_all(&combo) == 1 {
                results.push(combo.clone());
            }
            if !Self::advance(&mut combo, upper) {
                break;
            }
        }

        results
    }

    /// 里程表式推进: 末位 +1, 溢出则进位并复位为 1
    ///
    /// # 返回
    /// - true: 推进成功
    /// - false: 已枚举完毕
    fn advance(combo: &mut [u32], upper: u32) -> bool {
        for i in (0..combo.len()).rev() {
            if combo[i] < upper {
                combo[i] += 1;
                for c in combo.iter_mut().skip(i + 1) {
                    *c = 1;
                }
                return true;
            }
        }
        false
    }

    /// 向量整体最大公约数
    fn gcd_all(values: &[u32]) -> u32 {
        values.iter().copied().fold(0, Self::gcd)
    }

    fn gcd(a: u32, b: u32) -> u32 {
        if b == 0 {
            a
        } else {
            Self::gcd(b, a % b)
        }
    }
}
