// ==========================================
// Smart-Feed 多相喂料优化系统 - 命令行主入口
// ==========================================
// 运行方式:
//   1. 使用内置示例数据:      smart-feed
//   2. 从清单文件加载:        smart-feed --input waste_manifest.json
//   3. 调整参数:              smart-feed -i data.json --f-total 10.5 --eta 0.85
// 配置优先级: CLI > JSON 清单 > 默认值
// ==========================================

use anyhow::Context;
use clap::Parser;
use smart_feed::config::{ConfigOverrides, SystemConfig};
use smart_feed::domain::stream::WasteStream;
use smart_feed::importer::load_manifest;
use smart_feed::{logging, reporter, OptimizeApi, VERSION};
use std::path::PathBuf;
use std::time::Instant;

/// Smart-Feed — SCWO 喂料优化
#[derive(Debug, Parser)]
#[command(name = "smart-feed", version = VERSION, about = "Smart-Feed 多相喂料优化系统")]
struct Cli {
    /// 废料清单文件路径 (.json / .csv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    // ===== 反应器参数 =====
    /// 总进料容量 L/min (默认: 11.0)
    #[arg(long)]
    f_total: Option<f64>,
    /// 系统功率 kW (默认: 400)
    #[arg(long)]
    p_system: Option<f64>,

    // ===== 边界条件 =====
    /// 目标热值 BTU/lb (默认: 2200)
    #[arg(long)]
    btu_target: Option<f64>,
    /// 最大固体含量 % (默认: 15)
    #[arg(long)]
    solid_max_pct: Option<f64>,
    /// 最低 pH (默认: 6)
    #[arg(long)]
    ph_min: Option<f64>,
    /// 最高 pH (默认: 9)
    #[arg(long)]
    ph_max: Option<f64>,
    /// 最大盐浓度 ppm (默认: 5000)
    #[arg(long)]
    salt_max_ppm: Option<f64>,
    /// 柴油热值 BTU/lb (默认: 18300)
    #[arg(long)]
    btu_diesel: Option<f64>,
    /// 热效率因子 (默认: 0.89)
    #[arg(long)]
    eta: Option<f64>,

    // ===== 化学常数 =====
    /// F ppm→酸当量系数 (默认: 0.053)
    #[arg(long)]
    k_f_to_acid: Option<f64>,
    /// pH 碱贡献系数 (默认: 50.0)
    #[arg(long)]
    k_ph_to_base: Option<f64>,
    /// 酸→NaOH 体积系数 (默认: 8.28e-5)
    #[arg(long)]
    k_acid_to_naoh_vol: Option<f64>,

    // ===== 单位成本 =====
    /// 柴油 $/L (默认: 1.00)
    #[arg(long)]
    cost_diesel_per_l: Option<f64>,
    /// NaOH $/L (默认: 1.51)
    #[arg(long)]
    cost_naoh_per_l: Option<f64>,
    /// DI 水 $/L (默认: 0.00199)
    #[arg(long)]
    cost_water_per_l: Option<f64>,
    /// 电力 $/kWh (默认: 0.12)
    #[arg(long)]
    cost_electricity_per_kwh: Option<f64>,
    /// 人工 $/hr (默认: 100)
    #[arg(long)]
    cost_labor_per_hr: Option<f64>,

    // ===== 搜索参数 =====
    /// 配比总和上限 (默认: 11)
    #[arg(long)]
    ratio_sum_max: Option<u32>,
    /// 最低可行吞吐量 L/min (默认: 0.5)
    #[arg(long)]
    w_min: Option<f64>,
    /// 每子集保留模板数 (默认: 30)
    #[arg(long)]
    max_templates_per_subset: Option<usize>,
    /// 库存耗尽阈值 L (默认: 0.5)
    #[arg(long)]
    depletion_epsilon_l: Option<f64>,
    /// memo 量化粒度 L (默认: 1.0)
    #[arg(long)]
    memo_granularity_l: Option<f64>,
}

impl Cli {
    /// CLI 参数 → 配置覆盖（仅已给出的）
    fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            f_total: self.f_total,
            p_system: self.p_system,
            btu_target: self.btu_target,
            solid_max_pct: self.solid_max_pct,
            ph_min: self.ph_min,
            ph_max: self.ph_max,
            salt_max_ppm: self.salt_max_ppm,
            btu_diesel: self.btu_diesel,
            eta: self.eta,
            k_f_to_acid: self.k_f_to_acid,
            k_ph_to_base: self.k_ph_to_base,
            k_acid_to_naoh_vol: self.k_acid_to_naoh_vol,
            cost_diesel_per_l: self.cost_diesel_per_l,
            cost_naoh_per_l: self.cost_naoh_per_l,
            cost_water_per_l: self.cost_water_per_l,
            cost_electricity_per_kwh: self.cost_electricity_per_kwh,
            cost_labor_per_hr: self.cost_labor_per_hr,
            ratio_sum_max: self.ratio_sum_max,
            w_min: self.w_min,
            max_templates_per_subset: self.max_templates_per_subset,
            depletion_epsilon_l: self.depletion_epsilon_l,
            memo_granularity_l: self.memo_granularity_l,
        }
    }
}

/// 内置示例数据（基于 AxNano 典型废料）
fn example_streams() -> Vec<WasteStream> {
    vec![
        WasteStream {
            stream_id: "Resin".to_string(),
            quantity_l: 200.0,
            btu_per_lb: 12500.0,
            ph: 3.0,
            f_ppm: 15000.0,
            solid_pct: 100.0,
            salt_ppm: 500.0,
            moisture_pct: 0.0,
        },
        WasteStream {
            stream_id: "AFFF".to_string(),
            quantity_l: 500.0,
            btu_per_lb: 1.0,
            ph: 7.5,
            f_ppm: 5000.0,
            solid_pct: 0.5,
            salt_ppm: 200.0,
            moisture_pct: 99.5,
        },
        WasteStream {
            stream_id: "Caustic".to_string(),
            quantity_l: 300.0,
            btu_per_lb: 0.0,
            ph: 13.5,
            f_ppm: 0.0,
            solid_pct: 0.0,
            salt_ppm: 8000.0,
            moisture_pct: 65.0,
        },
    ]
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    tracing::info!("Smart-Feed 多相喂料优化系统 v{}", VERSION);

    // ── 加载数据 ──
    let (streams, json_overrides) = match &cli.input {
        Some(path) => {
            let manifest = load_manifest(path)
                .with_context(|| format!("加载清单失败: {}", path.display()))?;
            tracing::info!("已从 {} 加载 {} 条废料流", path.display(), manifest.streams.len());
            (manifest.streams, manifest.config)
        }
        None => {
            tracing::info!("使用内置示例数据 (Resin + AFFF + Caustic)");
            tracing::info!("提示: 使用 --input manifest.json 加载自定义数据");
            (example_streams(), None)
        }
    };

    // ── 构建配置: 默认值 → JSON 覆盖 → CLI 覆盖 ──
    let mut cfg = SystemConfig::default();
    if let Some(overrides) = &json_overrides {
        overrides.apply_to(&mut cfg);
    }
    cli.to_overrides().apply_to(&mut cfg);

    // ── 运行优化 ──
    tracing::info!("正在优化 {} 条废料流的喂料计划...", streams.len());
    let t0 = Instant::now();

    let outcome = OptimizeApi::run(&streams, &cfg).context("优化运行失败")?;

    let elapsed = t0.elapsed();
    println!("{}", reporter::full_report(&streams, &cfg, &outcome));
    println!("  计算耗时: {:.2}s", elapsed.as_secs_f64());
    println!("  成本节省: {:.1}%", outcome.savings_pct);

    Ok(())
}
