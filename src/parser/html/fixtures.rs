//! Detail-page markup shared by the extractor, runner and crawler tests.

/// A fully hydrated product page in the site's current layout.
pub(crate) fn product_page(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{name} | Buy Online</title></head>
<body>
  <div id="breadcrumbs-drug"><a href="/">Home</a> &gt; <a href="/categories">medicines</a> &gt; <a href="/categories/pain">PAIN RELIEF</a> &gt; <span>{name}</span></div>
  <div class="DrugHeader__left___19WY-">
    <h1 class="DrugHeader__title___1NKLq"> {name} </h1>
  </div>
  <div class="slick-slider">
    <div class="slick-list">
      <div class="slick-track"><img src="https://cdn.example.com/{name}.jpg" alt="{name}"></div>
    </div>
  </div>
  <div class="DrugPriceBox__container___dHgGW">
    <div class="DrugPriceBox__best-price___32JXw">₹30.24</div>
    <div class="DrugPriceBox__bestprice-slashed-price___2ANwD">₹33.60</div>
    <div class="DrugPriceBox__quantity___2LGBX">strip of 15 tablets</div>
  </div>
  <div id="overview">
    <div class="DrugOverview__container___CqA8x">
      <h2 class="DrugOverview__title___1OwgG">Introduction</h2>
      <div class="DrugOverview__content___22ZBX">{name} helps relieve pain and fever.</div>
    </div>
    <div class="DrugOverview__container___CqA8x">
      <h2 class="DrugOverview__title___1OwgG">Uses of {name}</h2>
      <div class="DrugOverview__content___22ZBX">
        <ul><li>Pain relief</li><li>Treatment of Fever</li></ul>
      </div>
    </div>
    <div class="DrugOverview__container___CqA8x">
      <h2 class="DrugOverview__title___1OwgG">How to use {name}</h2>
      <div class="DrugOverview__content___22ZBX">Take this medicine in the dose advised by your doctor.</div>
    </div>
    <div class="DrugOverview__container___CqA8x">
      <h2 class="DrugOverview__title___1OwgG">Safety advice</h2>
      <div class="DrugOverview__content___22ZBX">
        <div class="DrugOverview__warning___1s4wv">
          <div class="DrugOverview__warning-top___UD3xX"><span>Alcohol</span><div class="DrugOverview__warning-tag___lmAFe">UNSAFE</div></div>
          <div class="DrugOverview__content___22ZBX">It is unsafe to consume alcohol with {name}.</div>
        </div>
        <div class="DrugOverview__warning___1s4wv">
          <div class="DrugOverview__warning-top___UD3xX"><span>Pregnancy</span><div class="DrugOverview__warning-tag___lmAFe">CONSULT YOUR DOCTOR</div></div>
          <div class="DrugOverview__content___22ZBX">May be safe to use during pregnancy.</div>
        </div>
      </div>
    </div>
  </div>
</body>
</html>"#
    )
}

/// A page that rendered its shell but never hydrated the product overview.
pub(crate) fn unhydrated_page() -> String {
    r#"<!DOCTYPE html>
<html><body><div id="app"><div class="Loader__spinner___3xQ1p"></div></div></body></html>"#
        .to_string()
}
