// 路由模块
// 每个子模块对应一组对外接口

pub mod relay;
