// 业务操作层，组合存储库与工具函数

pub mod credentials;
