// ==========================================
// Smart-Feed 多相喂料优化系统 - 阶段与计划领域模型
// ==========================================
// PhaseResult: 单个 phase 的完整计算结果（装配后）
// Schedule:    完整喂料计划（多个 phase + 汇总）
// ==========================================

use crate::domain::blend::BlendProperties;
use serde::{Deserialize, Serialize};

// ==========================================
// CostBreakdown - 分项成本 ($)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub diesel: f64,      // 柴油
    pub naoh: f64,        // 35% NaOH
    pub water: f64,       // DI 水
    pub electricity: f64, // 电力
    pub labor: f64,       // 人工
    pub total: f64,       // 合计
}

// ==========================================
// PhaseResult - 单个 phase 的完整计算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResult {
    /// 参与流与配比分量, 顺序有意义: (1,2) ≠ (2,1)
    pub streams: Vec<(String, u32)>,

    /// 混合后属性
    pub blend: BlendProperties,

    // ===== 外部输入率 (L 外部输入 / L 废料) =====
    pub r_water: f64,  // 水需求率
    pub r_diesel: f64, // 柴油需求率
    pub r_naoh: f64,   // NaOH 需求率
    pub r_ext: f64,    // 总外部输入率

    // ===== 运行量 =====
    pub throughput_l_min: f64, // 废料吞吐量 W (L/min)
    pub num_batches: f64,      // 批次数 = min(库存_i / 配比_i)
    pub q_phase_l: f64,        // 本 phase 消耗的废料总量 (L)
    pub runtime_min: f64,      // 运行时间 (分钟)

    /// 分项成本
    pub costs: CostBreakdown,
}

impl PhaseResult {
    /// 本 phase 对指定流的绝对消耗量 (L)
    ///
    /// # 返回
    /// - Some(消耗量): 该流参与本 phase
    /// - None: 该流不参与
    pub fn consumed_l(&self, stream_id: &str) -> Option<f64> {
        self.streams
            .iter()
            .find(|(sid, _)| sid == stream_id)
            .map(|(_, ratio)| f64::from(*ratio) * self.num_batches)
    }
}

// ==========================================
// Schedule - 完整喂料计划
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// 有序 phase 序列（执行顺序）
    pub phases: Vec<PhaseResult>,
    /// 总成本 ($)
    pub total_cost: f64,
    /// 总运行时间 (分钟)
    pub total_runtime_min: f64,
}

impl Schedule {
    /// 总运行时间 (小时)
    pub fn total_runtime_hr(&self) -> f64 {
        self.total_runtime_min / 60.0
    }
}
