//! 数学库模块
//!
//! 基于 `nalgebra` 提供几何后处理所需的向量类型和辅助函数。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2/3
//! - **常量**：焊接容差、接缝平滑默认角度
//! - **工具函数**：角度换算、近似比较
//! - **向量扩展**：零向量安全的归一化、夹角计算

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 顶点焊接的单轴容差
    pub const WELD_EPSILON: f32 = f32::EPSILON;

    /// 接缝法线平滑的默认角度阈值（度）
    pub const DEFAULT_SEAM_ANGLE_DEGREES: f32 = 60.0;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }
}

/// 向量扩展 trait
///
/// 为 nalgebra 的向量类型添加几何后处理用到的便捷方法
pub trait Vector3Ext {
    /// 归一化向量，零向量返回零向量
    fn normalize_or_zero(&self) -> Vector3;

    /// 与另一个向量的夹角（弧度）
    ///
    /// 两个向量分别重新归一化后取点积的反余弦。
    /// 点积因浮点误差越过 [-1, 1] 时截断为 0 或 π。
    fn angle_to(&self, other: &Vector3) -> f32;

    /// 所有分量是否精确为零
    fn is_exact_zero(&self) -> bool;
}

impl Vector3Ext for Vector3 {
    fn normalize_or_zero(&self) -> Vector3 {
        self.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    fn angle_to(&self, other: &Vector3) -> f32 {
        let dot = self.normalize_or_zero().dot(&other.normalize_or_zero());

        if dot > 1.0 {
            0.0
        } else if dot < -1.0 {
            constants::PI
        } else {
            dot.acos()
        }
    }

    fn is_exact_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_zero() {
        let v = Vector3::new(3.0, 4.0, 0.0).normalize_or_zero();
        assert!(utils::approx_eq(v.norm(), 1.0, 1e-6));
        assert!(utils::approx_eq(v.x, 0.6, 1e-6));
        assert!(utils::approx_eq(v.y, 0.8, 1e-6));
    }

    #[test]
    fn test_normalize_zero_stays_zero() {
        let v = Vector3::zeros().normalize_or_zero();
        assert_eq!(v, Vector3::zeros());
        assert!(v.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_angle_between_axes() {
        let x = Vector3::x();
        let y = Vector3::y();
        assert!(utils::approx_eq(x.angle_to(&y), constants::PI / 2.0, 1e-6));
        assert!(utils::approx_eq(x.angle_to(&(-x)), constants::PI, 1e-6));
    }

    #[test]
    fn test_angle_ignores_length() {
        let a = Vector3::new(0.0, 0.0, 5.0);
        let b = Vector3::new(0.0, 0.0, 0.01);
        assert_eq!(a.angle_to(&b), 0.0);
    }

    #[test]
    fn test_angle_clamps_overshoot() {
        // 归一化后点积可能略大于 1
        let a = Vector3::new(0.1, 0.2, 0.3);
        let angle = a.angle_to(&a);
        assert!(angle.is_finite());
        assert!(angle < 1e-3);
    }

    #[test]
    fn test_is_exact_zero() {
        assert!(Vector3::zeros().is_exact_zero());
        assert!(!Vector3::new(0.0, f32::MIN_POSITIVE, 0.0).is_exact_zero());
    }

    #[test]
    fn test_deg_to_rad() {
        assert!(utils::approx_eq(utils::deg_to_rad(180.0), constants::PI, 1e-6));
    }
}
